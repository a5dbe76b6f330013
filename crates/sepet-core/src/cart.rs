//! # Cart
//!
//! The shopping cart and its derived totals.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                  Effect on lines                            │
//! │  ─────────                  ───────────────                            │
//! │  add_item(p)        ──────► existing: qty + 1 (position kept)          │
//! │                             new: push { p, qty: 1 }                    │
//! │                                                                         │
//! │  update_quantity(id, n) ──► n < 1: rejected, nothing changes           │
//! │                             else: qty = n on the matching line         │
//! │                                                                         │
//! │  remove_item(id) ─────────► retain lines with a different id           │
//! │                                                                         │
//! │  clear() ─────────────────► no lines                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{DiscountPolicy, Money};
use crate::types::{Product, ProductId};
use crate::validation::{validate_quantity, ValidationResult};

/// A product in the cart with its quantity.
///
/// The product is a frozen copy of the catalog entry taken when the line was
/// first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,

    /// Always at least 1.
    pub quantity: i64,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id (adding again increases quantity)
/// - Lines keep the order in which products were first added
/// - Every quantity is ≥ 1; lines only disappear through removal or clear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of `product`.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.find_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return;
        }

        self.lines.push(CartLine::new(product));
    }

    /// Sets the quantity of the line for `product_id`.
    ///
    /// ## Returns
    /// - `Err` if `quantity < 1`; the cart is untouched
    /// - `Ok(true)` if a line was updated
    /// - `Ok(false)` if no line matches `product_id`
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> ValidationResult<bool> {
        let quantity = validate_quantity(quantity)?;

        match self.find_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);
        self.lines.len() != initial_len
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines, saturating at `i64::MAX`.
    pub fn total_items(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of price × quantity over all lines.
    pub fn cart_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Computes every derived value in one pass.
    pub fn totals(&self, policy: &DiscountPolicy) -> CartTotals {
        CartTotals::compute(self, policy)
    }

    fn find_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }
}

/// Derived cart values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub total_items: i64,
    pub cart_total: Money,
    pub discount: Money,
    pub discounted_total: Money,
}

impl CartTotals {
    pub fn compute(cart: &Cart, policy: &DiscountPolicy) -> Self {
        let cart_total = cart.cart_total();
        let discount = policy.discount_for(cart_total);

        CartTotals {
            total_items: cart.total_items(),
            cart_total,
            discount,
            discounted_total: cart_total - discount,
        }
    }

    /// True when a discount is being applied.
    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}
