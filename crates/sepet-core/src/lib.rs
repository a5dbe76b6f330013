//! # sepet-core: Pure Cart Logic for Sepet
//!
//! This crate is the **heart** of Sepet. It contains the cart rules as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Sepet Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (external)                         │   │
//! │  │   Product list ──► Cart UI ──► Shipping ──► Submit button       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ intents                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 sepet-store (CartStore)                         │   │
//! │  │   add_to_cart, update_quantity, submit_order, ...               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sepet-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ shipping  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ Selector  │  │   │
//! │  │   │  Catalog  │  │ Discount  │  │  Totals   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Catalog)
//! - [`money`] - Money type with integer arithmetic and the discount policy
//! - [`cart`] - Cart lines, cart mutations and derived totals
//! - [`shipping`] - Shipping option list with a derived default selection
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use sepet_core::{Cart, Catalog, DiscountPolicy, ProductId};
//!
//! let catalog = Catalog::demo();
//! let mut cart = Cart::new();
//!
//! for id in [1, 2, 1, 3] {
//!     let product = catalog.get(ProductId(id)).unwrap();
//!     cart.add_item(product);
//! }
//!
//! let totals = cart.totals(&DiscountPolicy::default());
//! assert_eq!(totals.cart_total.cents(), 12_500);
//! assert_eq!(totals.discount.cents(), 1_250);
//! assert_eq!(totals.discounted_total.cents(), 11_250);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod shipping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CartError, CartResult, ValidationError};
pub use money::{DiscountPolicy, Money};
pub use shipping::ShippingSelector;
pub use types::{Catalog, Product, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Cart total at which the percentage discount starts to apply (100.00).
///
/// The threshold is inclusive: a total of exactly 100.00 is discounted.
pub const DEFAULT_DISCOUNT_THRESHOLD_CENTS: i64 = 10_000;

/// Discount rate in basis points (1000 = 10%).
pub const DEFAULT_DISCOUNT_RATE_BPS: u32 = 1_000;

/// Shipping methods offered out of the box, in display order.
pub const DEFAULT_SHIPPING_OPTIONS: [&str; 3] = ["Kara", "Hava", "Deniz"];
