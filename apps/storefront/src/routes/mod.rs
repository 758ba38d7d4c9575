//! # Routes
//!
//! JSON API for the storefront frontend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog.rs    GET  /health, /api/settings, /api/categories,            │
//! │                     /api/menu, /api/payment-methods                     │
//! │                POST /api/catalog/refresh                                │
//! │                                                                         │
//! │  session.rs    POST /api/sessions                                       │
//! │                                                                         │
//! │  cart.rs       GET|DELETE   /api/sessions/{id}/cart                     │
//! │                POST         /api/sessions/{id}/cart/items               │
//! │                PUT|DELETE   /api/sessions/{id}/cart/items/{key}         │
//! │                                                                         │
//! │  checkout.rs   GET  /api/sessions/{id}/checkout                         │
//! │                PUT  .../checkout/details, .../checkout/payment-method   │
//! │                POST .../checkout/proceed, /back, /place                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(catalog::health))
        .route("/api/settings", get(catalog::get_settings))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/menu", get(catalog::get_menu))
        .route("/api/payment-methods", get(catalog::list_payment_methods))
        .route("/api/catalog/refresh", post(catalog::refresh_catalog))
        .route("/api/sessions", post(session::create_session))
        .route(
            "/api/sessions/{id}/cart",
            get(cart::get_cart).delete(cart::clear_cart),
        )
        .route("/api/sessions/{id}/cart/items", post(cart::add_item))
        .route(
            "/api/sessions/{id}/cart/items/{key}",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/api/sessions/{id}/checkout", get(checkout::get_checkout))
        .route("/api/sessions/{id}/checkout/details", put(checkout::update_details))
        .route("/api/sessions/{id}/checkout/proceed", post(checkout::proceed))
        .route("/api/sessions/{id}/checkout/back", post(checkout::back))
        .route(
            "/api/sessions/{id}/checkout/payment-method",
            put(checkout::select_payment_method),
        )
        .route("/api/sessions/{id}/checkout/place", post(checkout::place_order))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::sample_state;

    #[tokio::test]
    async fn test_router_builds() {
        // axum panics on conflicting or malformed paths while building.
        let _router = router(sample_state().await);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use pares_core::catalog::InMemoryCatalog;
    use pares_core::money::Money;
    use pares_core::types::{AddOn, Category, MenuItem, PaymentMethod, SiteSettings, Variation};
    use uuid::Uuid;

    use crate::config::StorefrontConfig;
    use crate::state::AppState;

    pub fn sample_catalog() -> InMemoryCatalog {
        let mut drinks = Category::new("drinks", "Drinks", "🥤");
        drinks.sort_order = 1;

        InMemoryCatalog::new()
            .with_categories(vec![Category::new("pares", "Pares", "🍲"), drinks])
            .with_items(vec![
                MenuItem::new("beef-pares", "Beef Pares", Money::from_pesos(120), "pares")
                    .with_variations(vec![
                        Variation::new("regular", "Regular", Money::zero()),
                        Variation::new("large", "Large", Money::from_pesos(30)),
                    ])
                    .with_add_ons(vec![
                        AddOn::new("egg", "Fried Egg", "Extras", Money::from_pesos(15)),
                        AddOn::new("rice", "Garlic Rice", "Rice", Money::from_pesos(25)),
                    ]),
                MenuItem::new("gulaman", "Sago't Gulaman", Money::from_pesos(35), "drinks"),
                MenuItem::new("tocilog", "Tocilog", Money::from_pesos(130), "pares").unavailable(),
            ])
            .with_payment_methods(vec![
                PaymentMethod::new("gcash", "GCash", "0917 123 4567", "Primo Santos"),
                PaymentMethod::new("maya", "Maya", "0918 765 4321", "Primo Santos"),
            ])
            .with_settings(SiteSettings::default())
    }

    pub async fn ready_state(catalog: InMemoryCatalog) -> AppState {
        let state = AppState::new(StorefrontConfig::default(), Arc::new(catalog));
        state.catalog.refresh().await;
        state
    }

    pub async fn sample_state() -> AppState {
        ready_state(sample_catalog()).await
    }

    pub fn open_session(state: &AppState) -> Uuid {
        state.sessions.create().id
    }
}
