//! # Cart Routes
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Messenger│       │
//! │  │  Cart    │     │          │     │          │     │ handoff  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_item                                              │
//! │                   update_item (qty ≤ 0 removes)                         │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adding requires an open store and an available item. Updates and removals
//! of unknown line keys leave the cart unchanged.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use pares_core::cart::{Cart, CartItem};
use pares_core::customization::Customization;
use pares_core::money::Money;
use pares_core::validation::validate_quantity;
use pares_core::CoreError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Cart lines plus the header badge and the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub total_price: Money,
    /// `₱240.00`
    pub total_display: String,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_display: cart.total_price().to_string(),
        }
    }
}

pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CartResponse>> {
    state
        .sessions
        .with_session(id, |s| Ok(Json(CartResponse::from(&s.cart))))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnRequest {
    pub id: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub menu_item_id: String,
    #[serde(default = "one_i64")]
    pub quantity: i64,
    /// Defaults to the item's first variation.
    #[serde(default)]
    pub variation_id: Option<String>,
    #[serde(default)]
    pub add_ons: Vec<AddOnRequest>,
}

fn one() -> u32 {
    1
}

fn one_i64() -> i64 {
    1
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    /// Line key the item landed on.
    pub key: String,
    pub cart: CartResponse,
}

/// Adds a customized item to the cart.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a quantity outside 1..=999 or an unknown
///   variation or add-on
/// - `STORE_CLOSED`, `ITEM_UNAVAILABLE`, `NOT_FOUND`
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddToCartRequest>,
) -> ApiResult<Json<AddToCartResponse>> {
    validate_quantity(request.quantity).map_err(CoreError::from)?;

    let add_ons: Vec<(String, u32)> = request
        .add_ons
        .iter()
        .map(|a| (a.id.clone(), a.quantity))
        .collect();

    state.catalog.with_snapshot(|snapshot| {
        snapshot.ensure_open()?;
        let item = snapshot.orderable_item(&request.menu_item_id)?;
        let customization = Customization::resolve(item, request.variation_id.as_deref(), &add_ons)?;

        state.sessions.with_session(id, |session| {
            let key = customization.add_to(&mut session.cart, request.quantity);
            debug!(session = %id, %key, quantity = request.quantity, "Added to cart");
            Ok(Json(AddToCartResponse {
                key,
                cart: CartResponse::from(&session.cart),
            }))
        })
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// Sets a line's quantity; zero or below removes the line.
pub async fn update_item(
    State(state): State<AppState>,
    Path((id, key)): Path<(Uuid, String)>,
    Json(request): Json<UpdateQuantityRequest>,
) -> ApiResult<Json<CartResponse>> {
    if request.quantity > 0 {
        validate_quantity(request.quantity).map_err(CoreError::from)?;
    }

    state.sessions.with_session(id, |session| {
        session.cart.update_quantity(&key, request.quantity);
        debug!(session = %id, %key, quantity = request.quantity, "Cart line updated");
        Ok(Json(CartResponse::from(&session.cart)))
    })
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path((id, key)): Path<(Uuid, String)>,
) -> ApiResult<Json<CartResponse>> {
    state.sessions.with_session(id, |session| {
        session.cart.remove_from_cart(&key);
        Ok(Json(CartResponse::from(&session.cart)))
    })
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CartResponse>> {
    state.sessions.with_session(id, |session| {
        session.cart.clear();
        debug!(session = %id, "Cart cleared");
        Ok(Json(CartResponse::from(&session.cart)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::routes::test_support::{open_session, ready_state, sample_catalog, sample_state};
    use pares_core::types::SiteSettings;

    fn add(menu_item_id: &str, quantity: i64) -> AddToCartRequest {
        AddToCartRequest {
            menu_item_id: menu_item_id.to_string(),
            quantity,
            variation_id: None,
            add_ons: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_add_customized_item() {
        let state = sample_state().await;
        let id = open_session(&state);

        let request = AddToCartRequest {
            variation_id: Some("large".to_string()),
            add_ons: vec![
                AddOnRequest { id: "rice".to_string(), quantity: 1 },
                AddOnRequest { id: "egg".to_string(), quantity: 2 },
            ],
            ..add("beef-pares", 2)
        };
        let Json(added) = add_item(State(state.clone()), Path(id), Json(request)).await.unwrap();

        assert_eq!(added.key, "beef-pares:large:egg*2,rice*1");
        // 120 + 30 + 15×2 + 25 = 205 each
        assert_eq!(added.cart.total_price, Money::from_pesos(410));
        assert_eq!(added.cart.total_items, 2);
        assert_eq!(added.cart.total_display, "₱410.00");
    }

    #[tokio::test]
    async fn test_duplicate_adds_sum() {
        let state = sample_state().await;
        let id = open_session(&state);

        add_item(State(state.clone()), Path(id), Json(add("gulaman", 1))).await.unwrap();
        let Json(added) = add_item(State(state.clone()), Path(id), Json(add("gulaman", 2)))
            .await
            .unwrap();

        assert_eq!(added.cart.items.len(), 1);
        assert_eq!(added.cart.items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_add_rejections() {
        let state = sample_state().await;
        let id = open_session(&state);

        let err = add_item(State(state.clone()), Path(id), Json(add("tocilog", 1)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ItemUnavailable);

        let err = add_item(State(state.clone()), Path(id), Json(add("gulaman", 0)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_item(State(state.clone()), Path(id), Json(add("halo-halo", 1)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let request = AddToCartRequest {
            variation_id: Some("jumbo".to_string()),
            ..add("beef-pares", 1)
        };
        let err = add_item(State(state.clone()), Path(id), Json(request)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_item(State(state.clone()), Path(Uuid::new_v4()), Json(add("gulaman", 1)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_while_closed() {
        let state = ready_state(sample_catalog().with_settings(SiteSettings {
            store_open: false,
            closed_message: "Balik kami bukas!".to_string(),
            ..SiteSettings::default()
        }))
        .await;
        let id = open_session(&state);

        let err = add_item(State(state.clone()), Path(id), Json(add("gulaman", 1)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreClosed);
        assert_eq!(err.message, "Balik kami bukas!");
    }

    #[tokio::test]
    async fn test_update_remove_clear() {
        let state = sample_state().await;
        let id = open_session(&state);

        add_item(State(state.clone()), Path(id), Json(add("gulaman", 1))).await.unwrap();
        let Json(added) = add_item(State(state.clone()), Path(id), Json(add("beef-pares", 1)))
            .await
            .unwrap();
        let pares_key = added.key;

        let Json(cart) = update_item(
            State(state.clone()),
            Path((id, "gulaman".to_string())),
            Json(UpdateQuantityRequest { quantity: 4 }),
        )
        .await
        .unwrap();
        assert_eq!(cart.total_items, 5);

        let Json(cart) = update_item(
            State(state.clone()),
            Path((id, "gulaman".to_string())),
            Json(UpdateQuantityRequest { quantity: 0 }),
        )
        .await
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_price, Money::from_pesos(120));

        let Json(cart) = remove_item(State(state.clone()), Path((id, "nope".to_string())))
            .await
            .unwrap();
        assert_eq!(cart.items.len(), 1);

        let Json(cart) = remove_item(State(state.clone()), Path((id, pares_key))).await.unwrap();
        assert!(cart.items.is_empty());

        add_item(State(state.clone()), Path(id), Json(add("gulaman", 2))).await.unwrap();
        let Json(cart) = clear_cart(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(cart.total_price, Money::zero());

        let Json(cart) = get_cart(State(state), Path(id)).await.unwrap();
        assert!(cart.items.is_empty());
    }

    #[tokio::test]
    async fn test_update_above_limit_rejected() {
        let state = sample_state().await;
        let id = open_session(&state);
        add_item(State(state.clone()), Path(id), Json(add("gulaman", 1))).await.unwrap();

        let err = update_item(
            State(state.clone()),
            Path((id, "gulaman".to_string())),
            Json(UpdateQuantityRequest { quantity: 1000 }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
