//! # sepet-store: Cart Store Runtime
//!
//! Holds the mutable side of Sepet: the [`CartStore`] that the presentation
//! layer calls into, and the [`OrderLoader`] that simulates order submission.
//!
//! ## Module Organization
//! ```text
//! sepet_store/
//! ├── lib.rs       ◄─── Re-exports
//! ├── store.rs     ◄─── CartStore: cart ops, derived totals, submit
//! ├── loader.rs    ◄─── OrderLoader: keyed runs, cancellation
//! ├── backend.rs   ◄─── OrderBackend trait, SimulatedBackend
//! ├── events.rs    ◄─── CartEventSink notifications
//! ├── config.rs    ◄─── StoreConfig (TOML + env)
//! └── error.rs     ◄─── StoreError
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use sepet_core::{Catalog, ProductId};
//! use sepet_store::{CartStore, StoreConfig, SubmitOutcome};
//!
//! # async fn demo() -> Result<(), sepet_core::CartError> {
//! let mut store = CartStore::new(Catalog::demo(), StoreConfig::default());
//! store.add_product(ProductId(1))?;
//!
//! if let SubmitOutcome::Placed(confirmation) = store.submit_order().await {
//!     println!("order #{}", confirmation.order_id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod store;

pub use backend::{OrderBackend, OrderConfirmation, OrderRequest, SimulatedBackend};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use events::{CartEventSink, NoOpSink};
pub use loader::{OrderLoader, SubmissionState};
pub use store::{CartSnapshot, CartStore, SubmitOutcome};
