//! # Validation Module
//!
//! Field validators shared by checkout, the storefront API and catalog writes.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web frontend                                                 │
//! │  └── Disables "Proceed" until the details predicate holds              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront handler (Rust)                                    │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: quantities, party size, required fields              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog database (SQLite)                                    │
//! │  ├── validate_menu_item before insert                                  │
//! │  └── NOT NULL / CHECK / foreign key constraints                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::MenuItem;
use crate::{MAX_ITEM_QUANTITY, MAX_PARTY_SIZE, MIN_PARTY_SIZE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest free-text value accepted in a customer-entered field.
pub const MAX_TEXT_LENGTH: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

/// Requires a non-empty value. Whitespace counts as entered text, the same
/// as the checkout form's enable rule.
///
/// ```rust
/// use pares_core::validation::validate_required;
///
/// assert!(validate_required("name", "Juan").is_ok());
/// assert!(validate_required("name", " ").is_ok());
/// assert!(validate_required("name", "").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Requires something other than whitespace. Used for catalog names.
pub fn validate_not_blank(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Caps free-text length (notes, addresses, landmarks).
pub fn validate_max_length(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested add-to-cart quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// Quantity *updates* skip this: an update to 0 or below removes the line.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a dine-in party size against the stepper bounds.
pub fn validate_party_size(size: u32) -> ValidationResult<()> {
    if !(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&size) {
        return Err(ValidationError::OutOfRange {
            field: "party size".to_string(),
            min: MIN_PARTY_SIZE as i64,
            max: MAX_PARTY_SIZE as i64,
        });
    }
    Ok(())
}

/// Clamps a party size into the stepper bounds.
#[inline]
pub fn clamp_party_size(size: i64) -> u32 {
    size.clamp(MIN_PARTY_SIZE as i64, MAX_PARTY_SIZE as i64) as u32
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a menu item before it is written to the catalog.
///
/// ## Rules
/// - Name must not be empty
/// - Prices (base, discount, variation, add-on) must be non-negative
/// - While on discount, the discount price must be below the base price
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    validate_not_blank("name", &item.name)?;
    validate_not_blank("category", &item.category)?;

    if item.base_price.is_negative() {
        return Err(ValidationError::MustBePositive {
            field: "base price".to_string(),
        });
    }

    if let Some(discount) = item.discount_price {
        if discount.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: "discount price".to_string(),
            });
        }
        if item.is_on_discount && discount >= item.base_price {
            return Err(ValidationError::DiscountNotLower {
                base: item.base_price.centavos(),
                discount: discount.centavos(),
            });
        }
    }

    for add_on in &item.add_ons {
        validate_not_blank("add-on name", &add_on.name)?;
        if add_on.price.is_negative() {
            return Err(ValidationError::MustBePositive {
                field: format!("{} price", add_on.name),
            });
        }
    }

    for variation in &item.variations {
        validate_not_blank("variation name", &variation.name)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::AddOn;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_party_size_bounds() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(20).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(21).is_err());

        assert_eq!(clamp_party_size(-3), 1);
        assert_eq!(clamp_party_size(7), 7);
        assert_eq!(clamp_party_size(50), 20);
    }

    #[test]
    fn test_required_vs_not_blank() {
        assert!(validate_required("custom pickup time", " ").is_ok());
        assert_eq!(
            validate_required("custom pickup time", ""),
            Err(ValidationError::required("custom pickup time"))
        );
        assert!(validate_not_blank("name", " \t").is_err());
        assert!(validate_not_blank("name", "Pares").is_ok());
    }

    #[test]
    fn test_max_length_counts_chars() {
        assert!(validate_max_length("notes", "ñññ", 3).is_ok());
        assert!(validate_max_length("notes", "ññññ", 3).is_err());
    }

    #[test]
    fn test_menu_item_discount_invariant() {
        let item = MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains");
        assert!(validate_menu_item(&item).is_ok());
        assert!(validate_menu_item(&item.clone().with_discount(Money::from_pesos(100))).is_ok());

        let err = validate_menu_item(&item.clone().with_discount(Money::from_pesos(120))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DiscountNotLower {
                base: 12000,
                discount: 12000
            }
        );

        // A stale discount price is fine while the flag is off.
        let mut stale = item.with_discount(Money::from_pesos(150));
        stale.is_on_discount = false;
        assert!(validate_menu_item(&stale).is_ok());
    }

    #[test]
    fn test_menu_item_rejects_blank_and_negative() {
        let blank = MenuItem::new("x", "  ", Money::from_pesos(10), "mains");
        assert_eq!(validate_menu_item(&blank).unwrap_err(), ValidationError::required("name"));

        let negative_add_on = MenuItem::new("x", "Pares", Money::from_pesos(10), "mains")
            .with_add_ons(vec![AddOn::new("egg", "Egg", "Extras", Money::from_pesos(-1))]);
        assert!(validate_menu_item(&negative_add_on).is_err());
    }
}
