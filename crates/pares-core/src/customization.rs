//! # Item Customization
//!
//! State behind the "customize item" dialog: one variation, any number of
//! add-ons each with a quantity, and a live price preview.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Beef Pares                         ₱150.00  │ ◄── price_preview()
//! │                                              │
//! │  Choose Size                                 │
//! │   ( ) Regular        (•) Large +₱30.00       │ ◄── select_variation()
//! │                                              │
//! │  Extras                                      │ ◄── grouped_add_ons()
//! │   Egg +₱15.00                  [-] 2 [+]     │ ◄── set_add_on_quantity()
//! │  Rice                                        │
//! │   Garlic Rice +₱25.00          [-] 0 [+]     │
//! │                                              │
//! │           [ Add to Cart - ₱180.00 ]          │ ◄── add_to()
//! └──────────────────────────────────────────────┘
//! ```

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::unit_price;
use crate::types::{AddOn, MenuItem, SelectedAddOn, Variation};

/// Add-ons sharing a category tag, in the order the dialog lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOnGroup<'a> {
    pub category: &'a str,
    pub add_ons: Vec<&'a AddOn>,
}

/// Groups an item's add-ons by category tag in first-seen order.
pub fn grouped_add_ons(item: &MenuItem) -> Vec<AddOnGroup<'_>> {
    let mut groups: Vec<AddOnGroup<'_>> = Vec::new();
    for add_on in &item.add_ons {
        match groups.iter_mut().find(|g| g.category == add_on.category) {
            Some(group) => group.add_ons.push(add_on),
            None => groups.push(AddOnGroup {
                category: &add_on.category,
                add_ons: vec![add_on],
            }),
        }
    }
    groups
}

/// The dialog's selection for one menu item.
#[derive(Debug, Clone)]
pub struct Customization<'a> {
    item: &'a MenuItem,
    variation: Option<&'a Variation>,
    add_ons: Vec<SelectedAddOn>,
}

impl<'a> Customization<'a> {
    /// Opens the dialog with the first variation preselected and no add-ons.
    pub fn new(item: &'a MenuItem) -> Self {
        Customization {
            item,
            variation: item.default_variation(),
            add_ons: Vec::new(),
        }
    }

    /// Rebuilds a selection from ids, as posted by the storefront frontend.
    ///
    /// With no variation id, the item's first variation is used.
    ///
    /// ## Errors
    /// - `UnknownVariation` if the id is not one of the item's variations
    /// - `UnknownAddOn` if any add-on id is not one of the item's add-ons
    pub fn resolve(
        item: &'a MenuItem,
        variation_id: Option<&str>,
        add_ons: &[(String, u32)],
    ) -> CoreResult<Self> {
        let mut customization = Customization::new(item);
        if let Some(id) = variation_id {
            customization.select_variation(id)?;
        }
        for (id, quantity) in add_ons {
            let current = customization.add_on_quantity(id);
            customization.set_add_on_quantity(id, current.saturating_add(*quantity))?;
        }
        Ok(customization)
    }

    pub fn item(&self) -> &'a MenuItem {
        self.item
    }

    pub fn variation(&self) -> Option<&'a Variation> {
        self.variation
    }

    /// Selected add-ons in the order they were first picked.
    pub fn add_ons(&self) -> &[SelectedAddOn] {
        &self.add_ons
    }

    pub fn select_variation(&mut self, variation_id: &str) -> CoreResult<()> {
        let item = self.item;
        let variation = item
            .find_variation(variation_id)
            .ok_or_else(|| CoreError::UnknownVariation {
                item: item.name.clone(),
                variation: variation_id.to_string(),
            })?;
        self.variation = Some(variation);
        Ok(())
    }

    /// Sets how many of an add-on are selected; 0 deselects it.
    pub fn set_add_on_quantity(&mut self, add_on_id: &str, quantity: u32) -> CoreResult<()> {
        let item = self.item;
        let add_on = item
            .find_add_on(add_on_id)
            .ok_or_else(|| CoreError::UnknownAddOn {
                item: item.name.clone(),
                add_on: add_on_id.to_string(),
            })?;

        if quantity == 0 {
            self.add_ons.retain(|a| a.id != add_on_id);
            return Ok(());
        }

        match self.add_ons.iter_mut().find(|a| a.id == add_on_id) {
            Some(existing) => existing.quantity = quantity,
            None => self.add_ons.push(SelectedAddOn::new(add_on, quantity)),
        }
        Ok(())
    }

    pub fn add_on_quantity(&self, add_on_id: &str) -> u32 {
        self.add_ons
            .iter()
            .find(|a| a.id == add_on_id)
            .map(|a| a.quantity)
            .unwrap_or(0)
    }

    /// Unit price of the current selection.
    pub fn price_preview(&self) -> Money {
        unit_price(self.item, self.variation, &self.add_ons)
    }

    /// Puts `quantity` of this selection into the cart; returns the line key.
    pub fn add_to(&self, cart: &mut Cart, quantity: i64) -> String {
        cart.add_to_cart(self.item, quantity, self.variation, &self.add_ons)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pares() -> MenuItem {
        MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains")
            .with_variations(vec![
                Variation::new("regular", "Regular", Money::zero()),
                Variation::new("large", "Large", Money::from_pesos(30)),
            ])
            .with_add_ons(vec![
                AddOn::new("egg", "Egg", "Extras", Money::from_pesos(15)),
                AddOn::new("garlic", "Garlic Rice", "Rice", Money::from_pesos(25)),
                AddOn::new("chili", "Chili Oil", "Extras", Money::from_pesos(5)),
            ])
    }

    #[test]
    fn test_defaults_to_first_variation() {
        let item = pares();
        let c = Customization::new(&item);
        assert_eq!(c.variation().map(|v| v.id.as_str()), Some("regular"));
        assert_eq!(c.price_preview(), Money::from_pesos(120));
    }

    #[test]
    fn test_price_preview_follows_selection() {
        let item = pares();
        let mut c = Customization::new(&item);
        c.select_variation("large").unwrap();
        c.set_add_on_quantity("egg", 2).unwrap();
        assert_eq!(c.price_preview(), Money::from_pesos(180));

        c.set_add_on_quantity("egg", 0).unwrap();
        assert!(c.add_ons().is_empty());
        assert_eq!(c.price_preview(), Money::from_pesos(150));
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let item = pares();
        let groups = grouped_add_ons(&item);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Extras");
        assert_eq!(groups[0].add_ons.len(), 2);
        assert_eq!(groups[1].category, "Rice");
    }

    #[test]
    fn test_resolve_rejects_foreign_ids() {
        let item = pares();
        let err = Customization::resolve(&item, Some("jumbo"), &[]).unwrap_err();
        assert!(matches!(err, CoreError::UnknownVariation { .. }));

        let err = Customization::resolve(&item, None, &[("lechon".to_string(), 1)]).unwrap_err();
        assert!(matches!(err, CoreError::UnknownAddOn { .. }));
    }

    #[test]
    fn test_resolve_merges_repeated_ids() {
        let item = pares();
        let c = Customization::resolve(
            &item,
            Some("large"),
            &[("egg".to_string(), 1), ("egg".to_string(), 2)],
        )
        .unwrap();
        assert_eq!(c.add_on_quantity("egg"), 3);
    }

    #[test]
    fn test_add_to_cart_matches_direct_add() {
        let item = pares();
        let mut c = Customization::new(&item);
        c.set_add_on_quantity("garlic", 1).unwrap();
        c.set_add_on_quantity("egg", 1).unwrap();

        let mut cart = Cart::new();
        let key = c.add_to(&mut cart, 2);

        assert_eq!(key, "pares:regular:egg*1,garlic*1");
        assert_eq!(cart.total_price(), Money::from_pesos(160 * 2));
    }
}
