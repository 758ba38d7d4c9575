//! # Error Types
//!
//! Domain-specific error types for pares-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pares-core errors (this file)                                         │
//! │  ├── CoreError        - Menu, cart and checkout rule violations        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pares-db errors (separate crate)                                      │
//! │  └── DbError          - Catalog database failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the web frontend sees (serialized)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart math never fails: updating or removing an unknown line is a no-op,
//! so there is no "line not found" error here.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Storefront business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item id does not exist in the loaded catalog.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Menu item exists but is marked unavailable.
    #[error("{name} is currently unavailable")]
    ItemUnavailable { name: String },

    /// Variation id is not one of the item's variations.
    #[error("{item} has no variation '{variation}'")]
    UnknownVariation { item: String, variation: String },

    /// Add-on id is not one of the item's add-ons.
    #[error("{item} has no add-on '{add_on}'")]
    UnknownAddOn { item: String, add_on: String },

    /// The store is closed; ordering is blocked.
    ///
    /// ## When This Occurs
    /// - Site settings say `store_open = false`
    /// - Customer tries to add to cart or place an order
    #[error("{message}")]
    StoreClosed { message: String },

    /// Placing an order with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout action attempted from the wrong step.
    ///
    /// ## When This Occurs
    /// - `place_order` while still on the details step
    #[error("Checkout is on the {current} step, expected {expected}")]
    WrongCheckoutStep { current: String, expected: String },

    /// The catalog provider failed to deliver data.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Handoff URL could not be built from configuration.
    #[error("Invalid handoff URL: {0}")]
    InvalidHandoffUrl(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Discount price must undercut the base price.
    #[error("discount price {discount} must be lower than base price {base}")]
    DiscountNotLower { base: i64, discount: i64 },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownAddOn {
            item: "Beef Pares".to_string(),
            add_on: "egg".to_string(),
        };
        assert_eq!(err.to_string(), "Beef Pares has no add-on 'egg'");

        let err = CoreError::StoreClosed {
            message: "Sarado pa kami, Primo!".to_string(),
        };
        assert_eq!(err.to_string(), "Sarado pa kami, Primo!");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::required("address").to_string(),
            "address is required"
        );

        let err = ValidationError::OutOfRange {
            field: "party size".to_string(),
            min: 1,
            max: 20,
        };
        assert_eq!(err.to_string(), "party size must be between 1 and 20");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("name").into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
