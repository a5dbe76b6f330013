//! # Intent Commands
//!
//! Maps presentation-layer intents onto [`CartStore`] calls.
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line                                                             │
//! │  {"type":"add_to_cart","product_id":1}                                  │
//! │         │                                                               │
//! │         ▼  serde_json::from_str::<Intent>                               │
//! │  Intent::AddToCart { product_id: 1 }                                    │
//! │         │                                                               │
//! │         ▼  dispatch()                                                   │
//! │  store.add_product(1)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  {"ok":true,"view":{ lines, totals, shipping, flags, submission }}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use sepet_core::{Product, ProductId};
use sepet_store::{CartSnapshot, CartStore, OrderConfirmation, SubmitOutcome};

use crate::error::ApiError;

/// A user action coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    AddToCart { product_id: ProductId },
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    RemoveFromCart { product_id: ProductId },
    ClearCart,
    ChangeShipping { index: usize },
    SetShippingOptions { options: Vec<String> },
    SubmitOrder,
    View,
    Catalog,
}

/// One JSON line written back to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<CartSnapshot>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderConfirmation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<Product>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl CommandResponse {
    fn success(store: &CartStore) -> Self {
        CommandResponse {
            ok: true,
            view: Some(store.view()),
            order: None,
            catalog: None,
            error: None,
        }
    }

    fn failure(store: &CartStore, error: ApiError) -> Self {
        CommandResponse {
            ok: false,
            view: Some(store.view()),
            order: None,
            catalog: None,
            error: Some(error),
        }
    }
}

/// Applies one intent to the store.
pub async fn dispatch(store: &mut CartStore, intent: Intent) -> Result<CommandResponse, ApiError> {
    debug!(?intent, "dispatch");

    match intent {
        Intent::AddToCart { product_id } => store.add_product(product_id)?,
        Intent::UpdateQuantity {
            product_id,
            quantity,
        } => store.update_quantity(product_id, quantity),
        Intent::RemoveFromCart { product_id } => store.remove_from_cart(product_id),
        Intent::ClearCart => store.clear_cart(),
        Intent::ChangeShipping { index } => store.change_shipping(index)?,
        Intent::SetShippingOptions { options } => store.set_shipping_options(options),
        Intent::SubmitOrder => {
            return match store.submit_order().await {
                SubmitOutcome::Placed(confirmation) => Ok(CommandResponse {
                    order: Some(confirmation),
                    ..CommandResponse::success(store)
                }),
                SubmitOutcome::Failed(err) => Err(err.into()),
            };
        }
        Intent::View => {}
        Intent::Catalog => {
            return Ok(CommandResponse {
                catalog: Some(store.catalog().products().to_vec()),
                ..CommandResponse::success(store)
            });
        }
    }

    Ok(CommandResponse::success(store))
}

/// Parses and applies one input line. Errors become failure responses.
pub async fn handle_line(store: &mut CartStore, line: &str) -> CommandResponse {
    let intent = match serde_json::from_str::<Intent>(line) {
        Ok(intent) => intent,
        Err(e) => return CommandResponse::failure(store, e.into()),
    };

    match dispatch(store, intent).await {
        Ok(response) => response,
        Err(error) => CommandResponse::failure(store, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use sepet_core::Catalog;
    use sepet_store::StoreConfig;

    fn store() -> CartStore {
        CartStore::new(Catalog::demo(), StoreConfig::default())
    }

    #[test]
    fn test_intent_parsing() {
        let intent: Intent =
            serde_json::from_str(r#"{"type":"update_quantity","product_id":2,"quantity":-1}"#)
                .unwrap();
        assert_eq!(
            intent,
            Intent::UpdateQuantity {
                product_id: ProductId(2),
                quantity: -1
            }
        );

        let intent: Intent = serde_json::from_str(r#"{"type":"clear_cart"}"#).unwrap();
        assert_eq!(intent, Intent::ClearCart);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_then_view() {
        let mut store = store();

        let response = handle_line(&mut store, r#"{"type":"add_to_cart","product_id":3}"#).await;
        assert!(response.ok);

        let view = response.view.unwrap();
        assert_eq!(view.totals.total_items, 1);
        assert!(view.is_loading_new_cart);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_become_failure_responses() {
        let mut store = store();

        let response = handle_line(&mut store, r#"{"type":"add_to_cart","product_id":42}"#).await;
        assert!(!response.ok);
        assert_eq!(response.error.unwrap().code, ErrorCode::NotFound);

        let response = handle_line(&mut store, r#"{"type":"change_shipping","index":3}"#).await;
        assert_eq!(response.error.unwrap().code, ErrorCode::ValidationError);

        let response = handle_line(&mut store, "not json").await;
        assert_eq!(response.error.unwrap().code, ErrorCode::BadRequest);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_order_returns_confirmation() {
        let mut store = store();
        handle_line(&mut store, r#"{"type":"add_to_cart","product_id":1}"#).await;

        let response = handle_line(&mut store, r#"{"type":"submit_order"}"#).await;
        assert!(response.ok);
        assert!(response.order.unwrap().order_id < 10_000);
        assert_eq!(response.view.unwrap().totals.total_items, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_catalog_intent() {
        let mut store = store();
        let response = handle_line(&mut store, r#"{"type":"catalog"}"#).await;
        assert_eq!(response.catalog.unwrap().len(), 3);
    }
}
