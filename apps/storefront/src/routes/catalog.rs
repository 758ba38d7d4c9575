//! Catalog routes: health, settings, categories, menu and payment methods.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pares_core::catalog::CatalogSnapshot;
use pares_core::menu::{default_category, menu_sections, CategoryFilter, MenuSection};
use pares_core::types::{Category, PaymentMethod};

use crate::error::ApiResult;
use crate::state::{AppState, RefreshSummary};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub catalog_loaded: bool,
    /// `None` when no database is attached.
    pub database_ok: Option<bool>,
    pub sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = match state.database() {
        Some(db) => Some(db.health_check().await),
        None => None,
    };

    Json(HealthResponse {
        status: "ok",
        catalog_loaded: !state.catalog.is_loading(),
        database_ok,
        sessions: state.sessions.len(),
    })
}

/// Header data. While the catalog is loading, `loading` is set and the rest
/// holds placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub loading: bool,
    pub store_name: String,
    pub logo_url: Option<String>,
    pub store_open: bool,
    /// The closed overlay text, only when closed.
    pub closed_message: Option<String>,
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    let view = state
        .catalog
        .with_snapshot(|snapshot| Ok(settings_view(&state, snapshot)))
        .unwrap_or_else(|_| SettingsView {
            loading: true,
            store_name: state.config.store.fallback_name.clone(),
            logo_url: None,
            store_open: true,
            closed_message: None,
        });
    Json(view)
}

fn settings_view(state: &AppState, snapshot: &CatalogSnapshot) -> SettingsView {
    SettingsView {
        loading: false,
        store_name: state.store_name(snapshot),
        logo_url: snapshot.site_settings.as_ref().and_then(|s| s.logo_url.clone()),
        store_open: snapshot.is_store_open(),
        closed_message: snapshot.ensure_open().err().map(|e| e.to_string()),
    }
}

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    state
        .catalog
        .with_snapshot(|snapshot| Ok(Json(snapshot.categories.clone())))
}

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    /// The applied filter: `all` or a category id.
    pub category: String,
    /// First category, for frontends that open on a single section.
    pub default_category: Option<String>,
    pub sections: Vec<MenuSection>,
}

pub async fn get_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Json<MenuResponse>> {
    let filter = CategoryFilter::parse(query.category.as_deref());
    debug!(?filter, "Menu requested");

    state.catalog.with_snapshot(|snapshot| {
        Ok(Json(MenuResponse {
            category: match &filter {
                CategoryFilter::All => "all".to_string(),
                CategoryFilter::Only(id) => id.clone(),
            },
            default_category: default_category(snapshot).map(|c| c.id.clone()),
            sections: menu_sections(snapshot, &filter),
        }))
    })
}

pub async fn list_payment_methods(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PaymentMethod>>> {
    state
        .catalog
        .with_snapshot(|snapshot| Ok(Json(snapshot.payment_methods.clone())))
}

pub async fn refresh_catalog(State(state): State<AppState>) -> Json<RefreshSummary> {
    Json(state.catalog.refresh().await)
}
