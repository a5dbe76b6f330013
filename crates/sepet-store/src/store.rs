//! # Cart Store
//!
//! The single owner of the catalog, the cart, the derived totals, the
//! shipping selection and the order submission.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  Intent                 Cart change            Side effects             │
//! │  ──────                 ───────────            ────────────             │
//! │                                                                         │
//! │  add_to_cart() ───────► qty + 1 / push ──┐                              │
//! │  update_quantity() ───► qty = n ─────────┤                              │
//! │  remove_from_cart() ──► retain ──────────┼──► revision += 1             │
//! │  clear_cart() ────────► clear ───────────┘    totals recomputed         │
//! │                                               discount event (≥ 100)    │
//! │                                               loader.reload(snapshot)   │
//! │                                                                         │
//! │  change_shipping() ───► (none)                selection = options[i]    │
//! │                                                                         │
//! │  submit_order() ──────► clear on success      sending = true            │
//! │                                               await loader settlement   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every cart write reloads the order loader, whether or not the user asked
//! to submit. `is_loading_new_cart` distinguishes that background reload from
//! an explicit submit.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};
use ts_rs::TS;

use sepet_core::{
    Cart, CartError, CartLine, CartResult, CartTotals, Catalog, DiscountPolicy, Money, Product,
    ProductId, ShippingSelector,
};

use crate::backend::{OrderBackend, OrderConfirmation, OrderRequest, SimulatedBackend};
use crate::config::StoreConfig;
use crate::events::{CartEventSink, NoOpSink};
use crate::loader::{OrderLoader, SubmissionState};

/// Result of [`CartStore::submit_order`]. Failures are reported, not raised.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Placed(OrderConfirmation),
    Failed(CartError),
}

/// Everything the presentation layer reads, in one serializable value.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub shipping_options: Vec<String>,
    pub selected_shipping: Option<String>,
    pub is_sending: bool,
    pub is_loading_new_cart: bool,
    pub submission: SubmissionState,
    pub revision: u64,
}

/// Cart state plus its derived values and the order loader.
pub struct CartStore {
    config: StoreConfig,
    catalog: Catalog,
    cart: Cart,
    policy: DiscountPolicy,

    /// Cached derived values, refreshed on every cart write.
    totals: CartTotals,

    /// Cart total seen by the last recompute; `None` before the first one.
    observed_total: Option<Money>,

    shipping: ShippingSelector,
    loader: OrderLoader,
    events: Arc<dyn CartEventSink>,

    /// Bumped on every applied cart write; keys the loader runs.
    revision: u64,
}

impl CartStore {
    /// Creates a store backed by the simulated order backend.
    ///
    /// Must be called from within a Tokio runtime: the loader starts its
    /// first run for the empty cart immediately.
    pub fn new(catalog: Catalog, config: StoreConfig) -> Self {
        let backend = Arc::new(SimulatedBackend::from_config(&config));
        Self::with_parts(catalog, config, backend, Arc::new(NoOpSink))
    }

    /// Creates a store with a custom backend and event sink.
    pub fn with_parts(
        catalog: Catalog,
        config: StoreConfig,
        backend: Arc<dyn OrderBackend>,
        events: Arc<dyn CartEventSink>,
    ) -> Self {
        let mut store = CartStore {
            policy: config.discount_policy(),
            shipping: ShippingSelector::new(config.shipping.options.clone()),
            config,
            catalog,
            cart: Cart::new(),
            totals: CartTotals::default(),
            observed_total: None,
            loader: OrderLoader::new(backend),
            events,
            revision: 0,
        };

        store.recompute();
        store.reload_order();
        store
    }

    // =========================================================================
    // Cart Operations
    // =========================================================================

    /// Adds one unit of `product`, appending a line if it is new.
    pub fn add_to_cart(&mut self, product: &Product) {
        debug!(product_id = %product.id, "add_to_cart");
        self.cart.add_item(product);
        self.cart_changed();
    }

    /// Looks `product_id` up in the catalog and adds it.
    pub fn add_product(&mut self, product_id: ProductId) -> CartResult<()> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or(CartError::ProductNotFound(product_id))?;

        self.add_to_cart(&product);
        Ok(())
    }

    /// Sets a line's quantity. Quantities below 1 are ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        match self.cart.update_quantity(product_id, quantity) {
            Ok(found) => {
                debug!(product_id = %product_id, quantity, found, "update_quantity");
                self.cart_changed();
            }
            Err(e) => debug!(product_id = %product_id, error = %e, "Quantity update ignored"),
        }
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let removed = self.cart.remove_item(product_id);
        debug!(product_id = %product_id, removed, "remove_from_cart");
        self.cart_changed();
    }

    pub fn clear_cart(&mut self) {
        debug!("clear_cart");
        self.cart.clear();
        self.cart_changed();
    }

    // =========================================================================
    // Shipping
    // =========================================================================

    /// Selects `shipping_options[index]`.
    ///
    /// An out-of-range index fails with `InvalidArgument` and leaves the
    /// current selection in place.
    pub fn change_shipping(&mut self, index: usize) -> CartResult<()> {
        let selected = self.shipping.select(index)?;
        debug!(index, selected, "change_shipping");
        Ok(())
    }

    /// Replaces the shipping options; the selection resets to the first one.
    pub fn set_shipping_options(&mut self, options: Vec<String>) {
        self.shipping.set_options(options);
        debug!(selected = ?self.shipping.selected(), "Shipping options replaced");
    }

    // =========================================================================
    // Order Submission
    // =========================================================================

    /// Submits the current cart.
    ///
    /// Raises the sending flag, waits for the loader run of the present cart
    /// to settle, then clears the cart on success. A failure is logged and
    /// returned; the cart is left untouched.
    pub async fn submit_order(&mut self) -> SubmitOutcome {
        self.loader.set_sending(true);
        info!(
            revision = self.revision,
            total_items = self.totals.total_items,
            total = %self.totals.discounted_total,
            "Submitting order"
        );

        let outcome = self.loader.settled().await;
        self.loader.set_sending(false);

        match outcome {
            Ok(confirmation) => {
                info!(order_id = confirmation.order_id, "Order placed");
                self.events.order_placed(&confirmation);
                self.clear_cart();
                SubmitOutcome::Placed(confirmation)
            }
            Err(err) => {
                error!(error = %err, "Order submission failed");
                self.events.order_failed(&err);
                SubmitOutcome::Failed(err)
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    pub fn total_items(&self) -> i64 {
        self.totals.total_items
    }

    pub fn cart_total(&self) -> Money {
        self.totals.cart_total
    }

    pub fn discount(&self) -> Money {
        self.totals.discount
    }

    pub fn discounted_total(&self) -> Money {
        self.totals.discounted_total
    }

    pub fn shipping_options(&self) -> &[String] {
        self.shipping.options()
    }

    pub fn selected_shipping(&self) -> Option<&str> {
        self.shipping.selected()
    }

    pub fn is_sending(&self) -> bool {
        self.loader.is_sending()
    }

    /// True while the loader reloads for a changed, non-empty cart without
    /// an explicit submit in progress.
    pub fn is_loading_new_cart(&self) -> bool {
        self.loader.is_loading() && !self.loader.is_sending() && self.totals.total_items > 0
    }

    pub fn submission(&self) -> SubmissionState {
        self.loader.state()
    }

    /// Settled value of the current submission without waiting.
    pub fn submission_value(&self) -> CartResult<Option<OrderConfirmation>> {
        self.loader.value()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn view(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart.lines().to_vec(),
            totals: self.totals,
            shipping_options: self.shipping.options().to_vec(),
            selected_shipping: self.shipping.selected().map(str::to_string),
            is_sending: self.is_sending(),
            is_loading_new_cart: self.is_loading_new_cart(),
            submission: self.submission(),
            revision: self.revision,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn cart_changed(&mut self) {
        self.revision += 1;
        self.recompute();
        self.reload_order();
    }

    fn recompute(&mut self) {
        self.totals = self.cart.totals(&self.policy);

        let total = self.totals.cart_total;
        if self.observed_total.replace(total) == Some(total) {
            return;
        }

        if self.policy.is_eligible(total) {
            info!(
                cart_total = %self.totals.cart_total,
                discount = %self.totals.discount,
                "Discount applied to cart"
            );
            self.events.discount_applied(&self.totals);
        }
    }

    fn reload_order(&mut self) {
        self.loader.reload(OrderRequest {
            revision: self.revision,
            lines: self.cart.lines().to_vec(),
        });
    }
}
