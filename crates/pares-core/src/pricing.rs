//! # Pricing Calculator
//!
//! Computes the unit price of a (possibly customized) menu item.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   unit = effective_base + variation.price + Σ (add_on.price × qty)     │
//! │                                                                         │
//! │   effective_base = discount_price   if on discount                     │
//! │                  = base_price       otherwise                          │
//! │                                                                         │
//! │   Example: base 100, discount 80 (on), Large +20, Egg 10×2, Sauce 5×1  │
//! │            80 + 20 + 20 + 5 = 125                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No clamping: a negative variation delta can push the unit price down, and
//! the result is still exactly the sum above.

use crate::money::Money;
use crate::types::{MenuItem, SelectedAddOn, Variation};

/// Unit price of `item` with the given variation and add-on selection.
///
/// ```rust
/// use pares_core::money::Money;
/// use pares_core::pricing::unit_price;
/// use pares_core::types::{MenuItem, Variation};
///
/// let item = MenuItem::new("pares", "Beef Pares", Money::from_pesos(100), "mains");
/// let large = Variation::new("large", "Large", Money::from_pesos(20));
///
/// assert_eq!(unit_price(&item, Some(&large), &[]), Money::from_pesos(120));
/// ```
pub fn unit_price(
    item: &MenuItem,
    variation: Option<&Variation>,
    add_ons: &[SelectedAddOn],
) -> Money {
    let variation_delta = variation.map(|v| v.price).unwrap_or_default();
    item.effective_price() + variation_delta + add_ons_total(add_ons)
}

/// Σ `price × quantity` over the selected add-ons.
pub fn add_ons_total(add_ons: &[SelectedAddOn]) -> Money {
    add_ons.iter().map(SelectedAddOn::subtotal).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddOn;

    fn tapsilog() -> MenuItem {
        MenuItem::new("tapsilog", "Tapsilog", Money::from_pesos(100), "silog")
            .with_discount(Money::from_pesos(80))
    }

    #[test]
    fn test_discounted_item_with_variation_and_add_ons() {
        let item = tapsilog();
        let large = Variation::new("large", "Large", Money::from_pesos(20));
        let egg = AddOn::new("egg", "Egg", "Extras", Money::from_pesos(10));
        let sauce = AddOn::new("sauce", "Sauce", "Extras", Money::from_pesos(5));

        let add_ons = vec![SelectedAddOn::new(&egg, 2), SelectedAddOn::new(&sauce, 1)];
        assert_eq!(unit_price(&item, Some(&large), &add_ons), Money::from_pesos(125));
    }

    #[test]
    fn test_plain_item_is_effective_price() {
        let item = MenuItem::new("rice", "Rice", Money::from_pesos(20), "sides");
        assert_eq!(unit_price(&item, None, &[]), Money::from_pesos(20));
        assert_eq!(unit_price(&tapsilog(), None, &[]), Money::from_pesos(80));
    }

    #[test]
    fn test_negative_delta_is_not_clamped() {
        let item = MenuItem::new("pares", "Beef Pares", Money::from_pesos(10), "mains");
        let small = Variation::new("small", "Small", Money::from_pesos(-15));
        assert_eq!(unit_price(&item, Some(&small), &[]), Money::from_pesos(-5));
    }

    #[test]
    fn test_fractional_add_on_prices() {
        let item = MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains");
        let chili = AddOn::new("chili", "Chili Oil", "Sauces", Money::from_centavos(550));
        let add_ons = vec![SelectedAddOn::new(&chili, 3)];
        assert_eq!(add_ons_total(&add_ons), Money::from_centavos(1650));
        assert_eq!(unit_price(&item, None, &add_ons), Money::from_centavos(13650));
    }
}
