//! # Money Module
//!
//! Provides the `Money` type for monetary values and the `DiscountPolicy`
//! that turns a cart total into a discount.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    125 × 0.1 might print as 12.500000000000002                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    12500 × 1000 bps / 10000 = 1250  →  12.50 exactly                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sepet_core::money::Money;
//!
//! let price = Money::from_cents(2500); // 25.00
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.cents(), 5000);
//! assert_eq!(line.to_string(), "50.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::{DEFAULT_DISCOUNT_RATE_BPS, DEFAULT_DISCOUNT_THRESHOLD_CENTS};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents / kuruş).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.line_total ──► CartTotals.cart_total
///                                                │
///                                   DiscountPolicy.discount_for()
///                                                │
///                                                ▼
///                                   CartTotals.discounted_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole units (e.g. `from_major(25)` = 25.00).
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use sepet_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(3500);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 10_500);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `rate_bps` basis points of this amount, rounded half up to
    /// the minor unit.
    ///
    /// ## Example
    /// ```rust
    /// use sepet_core::money::Money;
    ///
    /// let total = Money::from_cents(12_500); // 125.00
    /// assert_eq!(total.percentage(1000).cents(), 1250); // 12.50
    /// ```
    pub fn percentage(&self, rate_bps: u32) -> Money {
        // i128 keeps large totals from overflowing before the division
        let cents = (self.0 as i128 * rate_bps as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Discount Policy
// =============================================================================

/// Threshold discount: once the cart total reaches `threshold`, a flat
/// percentage of the whole total is taken off.
///
/// ## Rule
/// ```text
/// cart_total ≥ threshold  →  discount = cart_total × rate
/// cart_total < threshold  →  discount = 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Inclusive lower bound for the discount to apply.
    pub threshold: Money,

    /// Discount rate in basis points (1000 = 10%).
    pub rate_bps: u32,
}

impl DiscountPolicy {
    pub const fn new(threshold: Money, rate_bps: u32) -> Self {
        DiscountPolicy {
            threshold,
            rate_bps,
        }
    }

    /// Returns true when `total` has reached the threshold.
    #[inline]
    pub fn is_eligible(&self, total: Money) -> bool {
        total >= self.threshold
    }

    /// Computes the discount for a cart total.
    pub fn discount_for(&self, total: Money) -> Money {
        if self.is_eligible(total) {
            total.percentage(self.rate_bps)
        } else {
            Money::zero()
        }
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy::new(
            Money::from_cents(DEFAULT_DISCOUNT_THRESHOLD_CENTS),
            DEFAULT_DISCOUNT_RATE_BPS,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_major() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.cents_part(), 99);

        assert_eq!(Money::from_major(25).cents(), 2500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_cents(2500);

        assert_eq!(price.multiply_quantity(i64::MAX / 10).cents(), i64::MAX);
        assert_eq!(price * i64::MAX, Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MAX) + price, Money::from_cents(i64::MAX));

        let total: Money = [Money::from_cents(i64::MAX), price, price].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        assert_eq!(Money::from_cents(i64::MIN) - price, Money::from_cents(i64::MIN));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(11_250).to_string(), "112.50");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(Money::from_cents(9_000).percentage(1000).cents(), 900);
        // 10% of 0.05 = 0.005 → 0.01
        assert_eq!(Money::from_cents(5).percentage(1000).cents(), 1);
        // 10% of 0.04 = 0.004 → 0.00
        assert_eq!(Money::from_cents(4).percentage(1000).cents(), 0);
    }

    #[test]
    fn test_discount_below_threshold_is_zero() {
        let policy = DiscountPolicy::default();
        assert_eq!(policy.discount_for(Money::from_major(90)), Money::zero());
        assert_eq!(policy.discount_for(Money::from_cents(9_999)), Money::zero());
    }

    #[test]
    fn test_discount_threshold_is_inclusive() {
        let policy = DiscountPolicy::default();
        assert!(policy.is_eligible(Money::from_major(100)));
        assert_eq!(policy.discount_for(Money::from_major(100)).cents(), 1000);
        assert_eq!(policy.discount_for(Money::from_major(125)).cents(), 1250);
    }
}
