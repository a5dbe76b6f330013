//! # Order Backend
//!
//! The collaborator that "places" an order. There is no real server: the
//! [`SimulatedBackend`] waits a fixed latency and answers with a random
//! order id.
//!
//! ## Request / Response
//! ```text
//! OrderRequest { revision: 7, lines: [...] }
//!        │
//!        ▼  place_order()  (sleep latency)
//! OrderConfirmation { success: true, order_id: 4821, placed_at: ... }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use ts_rs::TS;

use sepet_core::{CartLine, CartResult};

use crate::config::StoreConfig;

/// Snapshot of the cart that keys one loader run.
///
/// `revision` increases with every applied cart mutation, so two requests
/// with equal lines but different revisions are still different keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub revision: u64,
    pub lines: Vec<CartLine>,
}

/// What the backend returns for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderConfirmation {
    pub success: bool,
    pub order_id: u32,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

/// Places orders. Implementations must be cheap to share across tasks.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn place_order(&self, request: OrderRequest) -> CartResult<OrderConfirmation>;
}

/// Fixed-latency backend that always succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
    order_id_bound: u32,
}

impl SimulatedBackend {
    pub fn new(latency: Duration, order_id_bound: u32) -> Self {
        SimulatedBackend {
            latency,
            order_id_bound: order_id_bound.max(1),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.order_latency(), config.order.order_id_bound)
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::from_config(&StoreConfig::default())
    }
}

#[async_trait]
impl OrderBackend for SimulatedBackend {
    async fn place_order(&self, request: OrderRequest) -> CartResult<OrderConfirmation> {
        debug!(
            revision = request.revision,
            lines = request.lines.len(),
            latency_ms = self.latency.as_millis() as u64,
            "Simulating order submission"
        );

        tokio::time::sleep(self.latency).await;

        let order_id = rand::rng().random_range(0..self.order_id_bound);
        Ok(OrderConfirmation {
            success: true,
            order_id,
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_backend_waits_latency() {
        let backend = SimulatedBackend::new(Duration::from_millis(1500), 10_000);
        let started = Instant::now();

        let confirmation = backend
            .place_order(OrderRequest {
                revision: 1,
                lines: Vec::new(),
            })
            .await
            .unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert!(confirmation.success);
        assert!(confirmation.order_id < 10_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_ids_respect_bound() {
        let backend = SimulatedBackend::new(Duration::from_millis(1), 3);

        for revision in 0..20 {
            let confirmation = backend
                .place_order(OrderRequest {
                    revision,
                    lines: Vec::new(),
                })
                .await
                .unwrap();
            assert!(confirmation.order_id < 3);
        }
    }
}
