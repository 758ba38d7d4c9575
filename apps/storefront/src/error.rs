//! # API Error Type
//!
//! Unified error type for storefront routes.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  POST /api/sessions/{id}/cart/items                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Route handler: Result<Json<T>, ApiError>                        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store closed? ─── CoreError::StoreClosed ────────┐              │  │
//! │  │         │                                          │              │  │
//! │  │         ▼                                          ▼              │  │
//! │  │  Bad input? ────── CoreError::Validation ───── ApiError ────────►│  │
//! │  │         │                                   (status + JSON)      │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  409 { "code": "STORE_CLOSED",                                          │
//! │        "message": "Our restaurant is currently closed." }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use pares_core::CoreError;
use pares_db::DbError;

/// Error body returned by every failing route.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Menu item not found: beef-pares"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Session, menu item or cart line not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Ordering is switched off (409)
    StoreClosed,

    /// Menu item is marked unavailable (409)
    ItemUnavailable,

    /// Placing an order with an empty cart (409)
    EmptyCart,

    /// Checkout action from the wrong step (409)
    WrongStep,

    /// Catalog not loaded or provider failing (503)
    CatalogUnavailable,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::StoreClosed
            | ErrorCode::ItemUnavailable
            | ErrorCode::EmptyCart
            | ErrorCode::WrongStep => StatusCode::CONFLICT,
            ErrorCode::CatalogUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn catalog_loading() -> Self {
        ApiError::new(ErrorCode::CatalogUnavailable, "Menu is still loading")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MenuItemNotFound(id) => ApiError::not_found("Menu item", &id),
            e @ CoreError::ItemUnavailable { .. } => {
                ApiError::new(ErrorCode::ItemUnavailable, e.to_string())
            }
            e @ (CoreError::UnknownVariation { .. } | CoreError::UnknownAddOn { .. }) => {
                ApiError::validation(e.to_string())
            }
            CoreError::StoreClosed { message } => ApiError::new(ErrorCode::StoreClosed, message),
            e @ CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, e.to_string()),
            e @ CoreError::WrongCheckoutStep { .. } => {
                ApiError::new(ErrorCode::WrongStep, e.to_string())
            }
            e @ CoreError::CatalogUnavailable(_) => {
                ApiError::new(ErrorCode::CatalogUnavailable, e.to_string())
            }
            CoreError::InvalidHandoffUrl(reason) => {
                error!(%reason, "Messenger handoff misconfigured");
                ApiError::internal("Order handoff is not configured correctly")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => {
                ApiError::validation(format!("{} '{}' already exists", field, value))
            }
            DbError::Invalid(e) => ApiError::validation(e.to_string()),
            DbError::ForeignKeyViolation { message } => {
                error!("Foreign key violation: {}", message);
                ApiError::validation("Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                error!("Database operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Route result alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pares_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let closed: ApiError = CoreError::StoreClosed {
            message: "Sarado na po".to_string(),
        }
        .into();
        assert_eq!(closed.code, ErrorCode::StoreClosed);
        assert_eq!(closed.message, "Sarado na po");
        assert_eq!(closed.code.status(), StatusCode::CONFLICT);

        let missing: ApiError = CoreError::MenuItemNotFound("lomi".to_string()).into();
        assert_eq!(missing.code, ErrorCode::NotFound);
        assert_eq!(missing.message, "Menu item not found: lomi");

        let invalid: ApiError = CoreError::from(ValidationError::required("address")).into();
        assert_eq!(invalid.code, ErrorCode::ValidationError);
        assert_eq!(invalid.code.status(), StatusCode::BAD_REQUEST);

        let step: ApiError = CoreError::WrongCheckoutStep {
            current: "details".to_string(),
            expected: "payment".to_string(),
        }
        .into();
        assert_eq!(step.code, ErrorCode::WrongStep);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err: ApiError = DbError::QueryFailed("no such table: menu_items".to_string()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");

        let err: ApiError = DbError::not_found("SiteSettings", "1").into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::new(ErrorCode::EmptyCart, "Cart is empty")).unwrap();
        assert_eq!(json["code"], "EMPTY_CART");
        assert_eq!(json["message"], "Cart is empty");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::catalog_loading().into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
