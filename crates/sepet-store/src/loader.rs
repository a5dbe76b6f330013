//! # Order Loader
//!
//! Keyed asynchronous state machine around one [`OrderBackend`] call.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       OrderLoader States                                │
//! │                                                                         │
//! │   ┌──────┐  reload(key)  ┌─────────┐  backend Ok   ┌──────────────┐   │
//! │   │ Idle │──────────────►│ Pending │──────────────►│ Success(id)  │   │
//! │   └──────┘               └────┬────┘               └──────┬───────┘   │
//! │                               │ backend Err               │           │
//! │                               ▼                           │           │
//! │                          ┌─────────┐                      │           │
//! │                          │  Error  │                      │           │
//! │                          └────┬────┘                      │           │
//! │                               │      reload(new key)      │           │
//! │                               └───────────┬───────────────┘           │
//! │                                           ▼                            │
//! │                                       Pending                          │
//! │                                                                         │
//! │  Every reload cancels the previous run's token and bumps the           │
//! │  generation. A run only settles if its generation is still current.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sending flag lives next to the state so the run that settles can
//! clear it in the same update.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use ts_rs::TS;

use sepet_core::{CartError, CartResult};

use crate::backend::{OrderBackend, OrderConfirmation, OrderRequest};

// =============================================================================
// Submission State
// =============================================================================

/// Where the current order submission stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionState {
    /// No request has been issued yet.
    #[default]
    Idle,
    Pending,
    Success(OrderConfirmation),
    Error(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Success(_) | SubmissionState::Error(_))
    }

    /// The settled outcome, or `None` while idle or pending.
    fn outcome(&self) -> Option<CartResult<OrderConfirmation>> {
        match self {
            SubmissionState::Success(confirmation) => Some(Ok(confirmation.clone())),
            SubmissionState::Error(message) => Some(Err(CartError::SubmissionFailed(message.clone()))),
            SubmissionState::Idle | SubmissionState::Pending => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct LoaderStatus {
    generation: u64,
    state: SubmissionState,
    sending: bool,
}

// =============================================================================
// Order Loader
// =============================================================================

/// Runs at most one live order submission, keyed by [`OrderRequest`].
pub struct OrderLoader {
    backend: Arc<dyn OrderBackend>,

    /// Shared with every spawned run.
    status: Arc<watch::Sender<LoaderStatus>>,

    /// Token of the run that may still settle.
    current: Option<CancellationToken>,
}

impl OrderLoader {
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        let (status, _) = watch::channel(LoaderStatus::default());

        OrderLoader {
            backend,
            status: Arc::new(status),
            current: None,
        }
    }

    /// Starts a run for `request`, superseding any outstanding one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn reload(&mut self, request: OrderRequest) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }

        let mut generation = 0;
        self.status.send_modify(|status| {
            status.generation += 1;
            status.state = SubmissionState::Pending;
            generation = status.generation;
        });

        debug!(generation, revision = request.revision, "Order load started");

        let token = CancellationToken::new();
        let run = LoaderRun {
            generation,
            token: token.clone(),
            backend: Arc::clone(&self.backend),
            status: Arc::clone(&self.status),
        };
        tokio::spawn(run.execute(request));

        self.current = Some(token);
    }

    /// Current value, read without waiting.
    ///
    /// ## Returns
    /// - `Ok(None)` while idle or pending
    /// - `Ok(Some(_))` once the current run succeeded
    /// - `Err(SubmissionFailed)` once the current run failed
    pub fn value(&self) -> CartResult<Option<OrderConfirmation>> {
        self.status.borrow().state.outcome().transpose()
    }

    /// Waits for the current run to settle and returns its outcome.
    pub async fn settled(&self) -> CartResult<OrderConfirmation> {
        if matches!(self.status.borrow().state, SubmissionState::Idle) {
            return Err(CartError::SubmissionFailed(
                "no order request has been issued".into(),
            ));
        }

        let mut rx = self.status.subscribe();
        let status = rx
            .wait_for(|status| status.state.is_settled())
            .await
            .map_err(|_| CartError::SubmissionFailed("order loader stopped".into()))?;

        match status.state.outcome() {
            Some(outcome) => outcome,
            None => Err(CartError::SubmissionFailed("order loader stopped".into())),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.status.borrow().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.status.borrow().state.is_pending()
    }

    pub fn is_sending(&self) -> bool {
        self.status.borrow().sending
    }

    pub fn set_sending(&self, sending: bool) {
        self.status.send_modify(|status| status.sending = sending);
    }

    /// Number of runs started so far.
    pub fn generation(&self) -> u64 {
        self.status.borrow().generation
    }
}

impl Drop for OrderLoader {
    fn drop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

// =============================================================================
// Loader Run
// =============================================================================

/// One spawned backend call.
struct LoaderRun {
    generation: u64,
    token: CancellationToken,
    backend: Arc<dyn OrderBackend>,
    status: Arc<watch::Sender<LoaderStatus>>,
}

impl LoaderRun {
    async fn execute(self, request: OrderRequest) {
        let outcome = tokio::select! {
            _ = self.token.cancelled() => {
                debug!(generation = self.generation, "Superseded order load cancelled");
                return;
            }
            outcome = self.backend.place_order(request) => outcome,
        };

        let generation = self.generation;
        let token = &self.token;
        let applied = self.status.send_if_modified(|status| {
            if status.generation != generation || token.is_cancelled() {
                return false;
            }

            status.state = match outcome {
                Ok(confirmation) => SubmissionState::Success(confirmation),
                Err(CartError::SubmissionFailed(message)) => SubmissionState::Error(message),
                Err(other) => SubmissionState::Error(other.to_string()),
            };
            status.sending = false;
            true
        });

        if applied {
            debug!(generation, "Order load settled");
        } else {
            warn!(generation, "Late order result for a superseded cart ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::time::Duration;

    /// Answers with `order_id = revision` after `revision` seconds.
    struct EchoBackend;

    #[async_trait]
    impl OrderBackend for EchoBackend {
        async fn place_order(&self, request: OrderRequest) -> CartResult<OrderConfirmation> {
            tokio::time::sleep(Duration::from_secs(request.revision)).await;
            Ok(OrderConfirmation {
                success: true,
                order_id: request.revision as u32,
                placed_at: Utc::now(),
            })
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl OrderBackend for FailingBackend {
        async fn place_order(&self, _request: OrderRequest) -> CartResult<OrderConfirmation> {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Err(CartError::SubmissionFailed("backend unavailable".into()))
        }
    }

    fn request(revision: u64) -> OrderRequest {
        OrderRequest {
            revision,
            lines: Vec::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_idle() {
        let loader = OrderLoader::new(Arc::new(EchoBackend));
        assert_eq!(loader.state(), SubmissionState::Idle);
        assert_eq!(loader.value(), Ok(None));
        assert!(loader.settled().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_settles_and_clears_sending() {
        let mut loader = OrderLoader::new(Arc::new(EchoBackend));
        loader.reload(request(1));
        loader.set_sending(true);

        assert!(loader.is_loading());
        assert_eq!(loader.value(), Ok(None));

        let confirmation = loader.settled().await.unwrap();
        assert_eq!(confirmation.order_id, 1);
        assert!(!loader.is_loading());
        assert!(!loader.is_sending());
        assert_eq!(loader.value(), Ok(Some(confirmation)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_run_never_settles() {
        let mut loader = OrderLoader::new(Arc::new(EchoBackend));

        // Run 1 would finish after 1s, run 5 after 5s.
        loader.reload(request(1));
        loader.set_sending(true);
        loader.reload(request(5));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(loader.is_loading());
        assert!(loader.is_sending());

        let confirmation = loader.settled().await.unwrap();
        assert_eq!(confirmation.order_id, 5);
        assert_eq!(loader.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_settles_as_error() {
        let mut loader = OrderLoader::new(Arc::new(FailingBackend));
        loader.set_sending(true);
        loader.reload(request(1));

        let err = loader.settled().await.unwrap_err();
        assert_eq!(err, CartError::SubmissionFailed("backend unavailable".into()));
        assert_eq!(
            loader.state(),
            SubmissionState::Error("backend unavailable".into())
        );
        assert!(loader.value().is_err());
        assert!(!loader.is_sending());
    }

    #[test]
    fn test_submission_state_serialization() {
        let json = serde_json::to_value(SubmissionState::Pending).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "pending" }));

        let json = serde_json::to_value(SubmissionState::Error("x".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "detail": "x" }));
    }
}
