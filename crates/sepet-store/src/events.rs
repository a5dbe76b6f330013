//! # Cart Events
//!
//! Observability hooks fired by the store. Sinks observe; they never change
//! cart state, so firing an event cannot trigger another recomputation.
//!
//! ```text
//! totals recomputed ──► cart_total ≥ threshold? ──► discount_applied()
//! submit_order      ──► settled Ok              ──► order_placed()
//!                   └─► settled Err             ──► order_failed()
//! ```

use sepet_core::{CartError, CartTotals};

use crate::backend::OrderConfirmation;

/// Receives store notifications (e.g. a UI toast, a metrics counter).
pub trait CartEventSink: Send + Sync {
    /// The freshly recomputed total qualifies for the discount.
    fn discount_applied(&self, totals: &CartTotals);

    fn order_placed(&self, confirmation: &OrderConfirmation);

    fn order_failed(&self, error: &CartError);
}

/// No-op sink for when only the tracing output is wanted.
pub struct NoOpSink;

impl CartEventSink for NoOpSink {
    fn discount_applied(&self, _totals: &CartTotals) {}
    fn order_placed(&self, _confirmation: &OrderConfirmation) {}
    fn order_failed(&self, _error: &CartError) {}
}
