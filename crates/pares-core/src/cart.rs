//! # Cart Store
//!
//! Ordered collection of cart lines keyed by customization identity.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Menu Action              Cart Method             Cart Change           │
//! │  ───────────              ───────────             ───────────           │
//! │                                                                         │
//! │  "Add to Cart" ─────────► add_to_cart() ────────► push, or qty += n    │
//! │                                                                         │
//! │  +/- stepper ───────────► update_quantity() ────► qty = n, ≤0 removes  │
//! │                                                                         │
//! │  Trash icon ────────────► remove_from_cart() ───► remove line          │
//! │                                                                         │
//! │  "Clear All" ───────────► clear() ──────────────► empty                │
//! │                                                                         │
//! │  Header badge / total ──► total_items() / total_price() (read only)    │
//! │                                                                         │
//! │  Unknown keys are a no-op everywhere. Cart math never fails.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Identity
//! ```text
//! plain item                     pares
//! variation only                 pares:large:
//! add-ons only                   pares:-:egg*2,garlic*1
//! variation + add-ons            pares:large:egg*2,garlic*1
//! ```
//! Add-ons are canonicalised first (merge duplicate ids, drop zero
//! quantities, sort by id), so the order the customer ticked them in does not
//! create a second line. The line itself keeps them in selection order.
//!
//! Each id is escaped before joining (`:` `,` `*` `%` are percent-encoded and
//! an id of `-` becomes `%2D`), so an item called `pares:large:` can never
//! land on the Large Pares line.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::unit_price;
use crate::types::{MenuItem, SelectedAddOn, Variation};

// =============================================================================
// Line Identity
// =============================================================================

/// Characters with a meaning inside a cart key.
const KEY_SEPARATORS: &AsciiSet = &CONTROLS.add(b':').add(b',').add(b'*').add(b'%');

/// Placeholder for "no variation".
const NO_VARIATION: &str = "-";

/// Merges duplicate add-on ids and drops zero quantities, keeping the order
/// the add-ons were first selected in.
pub fn merge_add_ons(add_ons: &[SelectedAddOn]) -> Vec<SelectedAddOn> {
    let mut merged: Vec<SelectedAddOn> = Vec::with_capacity(add_ons.len());
    for add_on in add_ons {
        match merged.iter_mut().find(|a| a.id == add_on.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(add_on.quantity),
            None => merged.push(add_on.clone()),
        }
    }
    merged.retain(|a| a.quantity > 0);
    merged
}

/// [`merge_add_ons`], then sorted by id.
pub fn canonical_add_ons(add_ons: &[SelectedAddOn]) -> Vec<SelectedAddOn> {
    let mut canonical = merge_add_ons(add_ons);
    canonical.sort_by(|a, b| a.id.cmp(&b.id));
    canonical
}

fn key_part(id: &str) -> String {
    if id == NO_VARIATION {
        return "%2D".to_string();
    }
    utf8_percent_encode(id, KEY_SEPARATORS).to_string()
}

/// Builds the cart key for an item, variation and canonical add-on list.
///
/// ```rust
/// use pares_core::cart::cart_key;
///
/// assert_eq!(cart_key("pares", None, &[]), "pares");
/// assert_eq!(cart_key("pares:large:", None, &[]), "pares%3Alarge%3A");
/// ```
pub fn cart_key(
    menu_item_id: &str,
    variation: Option<&Variation>,
    canonical: &[SelectedAddOn],
) -> String {
    let item_part = key_part(menu_item_id);
    if variation.is_none() && canonical.is_empty() {
        return item_part;
    }

    let variation_part = variation
        .map(|v| key_part(&v.id))
        .unwrap_or_else(|| NO_VARIATION.to_string());
    let add_on_part = canonical
        .iter()
        .map(|a| format!("{}*{}", key_part(&a.id), a.quantity))
        .collect::<Vec<_>>()
        .join(",");

    format!("{}:{}:{}", item_part, variation_part, add_on_part)
}

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the cart.
///
/// Name, variation and add-ons are snapshots taken when the line was created;
/// `total_price` is the frozen unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Canonical line key (see [`cart_key`]).
    pub id: String,
    pub menu_item_id: String,
    pub name: String,
    /// Unit price including variation and add-ons.
    pub total_price: Money,
    pub quantity: i64,
    pub selected_variation: Option<Variation>,
    pub selected_add_ons: Vec<SelectedAddOn>,
}

impl CartItem {
    /// `total_price × quantity`, saturating.
    pub fn line_total(&self) -> Money {
        Money::from_centavos(self.total_price.centavos().saturating_mul(self.quantity))
    }

    /// True when this line has no variation and no add-ons.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.selected_variation.is_none() && self.selected_add_ons.is_empty()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by key (adding the same customization sums quantities)
/// - Every line has quantity ≥ 1
/// - Lines keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` of a customized item and returns the line key.
    ///
    /// ## Behavior
    /// - Same key already in the cart: quantities are summed
    /// - Otherwise: a new line is appended with a frozen unit price
    /// - `quantity ≤ 0`: nothing is added
    pub fn add_to_cart(
        &mut self,
        item: &MenuItem,
        quantity: i64,
        variation: Option<&Variation>,
        add_ons: &[SelectedAddOn],
    ) -> String {
        let selected = merge_add_ons(add_ons);
        let key = cart_key(&item.id, variation, &canonical_add_ons(&selected));

        if quantity <= 0 {
            return key;
        }

        if let Some(existing) = self.items.iter_mut().find(|line| line.id == key) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return key;
        }

        self.items.push(CartItem {
            id: key.clone(),
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            total_price: unit_price(item, variation, &selected),
            quantity,
            selected_variation: variation.cloned(),
            selected_add_ons: selected,
        });
        key
    }

    /// Sets a line's quantity; `quantity ≤ 0` removes the line.
    pub fn update_quantity(&mut self, key: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(key);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id == key) {
            line.quantity = quantity;
        }
    }

    /// Removes a line. Unknown keys are ignored.
    pub fn remove_from_cart(&mut self, key: &str) {
        self.items.retain(|line| line.id != key);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ line totals, saturating.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantities, for the header badge.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Quantity of the plain (uncustomized) line of a menu item, or 0.
    pub fn quantity_of(&self, menu_item_id: &str) -> i64 {
        self.get(&cart_key(menu_item_id, None, &[]))
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn get(&self, key: &str) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id == key)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddOn;

    fn pares() -> MenuItem {
        MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains")
            .with_variations(vec![
                Variation::new("regular", "Regular", Money::zero()),
                Variation::new("large", "Large", Money::from_pesos(30)),
            ])
            .with_add_ons(vec![
                AddOn::new("egg", "Egg", "Extras", Money::from_pesos(15)),
                AddOn::new("garlic", "Garlic Rice", "Rice", Money::from_pesos(25)),
            ])
    }

    fn rice() -> MenuItem {
        MenuItem::new("rice", "Plain Rice", Money::from_pesos(20), "sides")
    }

    fn selected(item: &MenuItem, id: &str, qty: u32) -> SelectedAddOn {
        let add_on = item.find_add_on(id).unwrap();
        SelectedAddOn::new(add_on, qty)
    }

    #[test]
    fn test_duplicate_adds_sum_quantities() {
        let mut cart = Cart::new();
        let item = rice();

        cart.add_to_cart(&item, 1, None, &[]);
        cart.add_to_cart(&item, 2, None, &[]);
        cart.add_to_cart(&item, 3, None, &[]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 6);
        assert_eq!(cart.total_price(), Money::from_pesos(120));
    }

    #[test]
    fn test_distinct_customizations_are_distinct_lines() {
        let mut cart = Cart::new();
        let item = pares();
        let large = item.find_variation("large").cloned();
        let regular = item.find_variation("regular").cloned();

        cart.add_to_cart(&item, 1, large.as_ref(), &[]);
        cart.add_to_cart(&item, 1, regular.as_ref(), &[]);
        cart.add_to_cart(&item, 1, large.as_ref(), &[selected(&item, "egg", 1)]);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.items()[0].total_price, Money::from_pesos(150));
        assert_eq!(cart.items()[2].total_price, Money::from_pesos(165));
    }

    #[test]
    fn test_add_on_order_does_not_matter() {
        let mut cart = Cart::new();
        let item = pares();
        let egg = selected(&item, "egg", 2);
        let garlic = selected(&item, "garlic", 1);

        let k1 = cart.add_to_cart(&item, 1, None, &[egg.clone(), garlic.clone()]);
        let k2 = cart.add_to_cart(&item, 1, None, &[garlic, egg]);

        assert_eq!(k1, k2);
        assert_eq!(k1, "pares:-:egg*2,garlic*1");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_canonical_add_ons_merge_and_drop_zero() {
        let item = pares();
        let canonical = canonical_add_ons(&[
            selected(&item, "garlic", 0),
            selected(&item, "egg", 1),
            selected(&item, "egg", 2),
        ]);
        assert_eq!(canonical.len(), 1);
        assert_eq!(canonical[0].id, "egg");
        assert_eq!(canonical[0].quantity, 3);

        // Zero-quantity add-ons collapse to the plain line.
        assert_eq!(cart_key("pares", None, &canonical_add_ons(&[selected(&item, "egg", 0)])), "pares");
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        let item = rice();
        let key = cart.add_to_cart(&item, 2, None, &[]);
        cart.add_to_cart(&pares(), 1, None, &[]);

        cart.update_quantity(&key, 0);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("rice"), 0);
        assert_eq!(cart.total_price(), Money::from_pesos(120));
    }

    #[test]
    fn test_update_sets_quantity() {
        let mut cart = Cart::new();
        let key = cart.add_to_cart(&rice(), 1, None, &[]);
        cart.update_quantity(&key, 5);
        assert_eq!(cart.quantity_of("rice"), 5);

        cart.update_quantity(&key, -1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_noops() {
        let mut cart = Cart::new();
        cart.add_to_cart(&rice(), 1, None, &[]);
        let before = cart.clone();

        cart.update_quantity("nope", 4);
        cart.remove_from_cart("nope");

        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_is_order_invariant() {
        let item = pares();
        let large = item.find_variation("large").cloned();
        let egg = selected(&item, "egg", 2);

        let mut a = Cart::new();
        a.add_to_cart(&item, 2, large.as_ref(), &[egg.clone()]);
        a.add_to_cart(&rice(), 3, None, &[]);
        a.add_to_cart(&item, 1, None, &[]);

        let mut b = Cart::new();
        b.add_to_cart(&item, 1, None, &[]);
        b.add_to_cart(&rice(), 3, None, &[]);
        b.add_to_cart(&item, 2, large.as_ref(), &[egg]);

        assert_eq!(a.total_price(), b.total_price());
        assert_eq!(a.total_price(), Money::from_pesos(180 * 2 + 60 + 120));
    }

    #[test]
    fn test_totals_and_badge() {
        let mut cart = Cart::new();
        cart.add_to_cart(&rice(), 2, None, &[]);
        cart.add_to_cart(&pares(), 1, None, &[]);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::from_pesos(160));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Money::zero());
    }

    #[test]
    fn test_total_saturates() {
        let mut cart = Cart::new();
        let pricey = MenuItem::new("gold", "Gold Pares", Money::from_centavos(i64::MAX / 2), "mains");
        cart.add_to_cart(&pricey, 3, None, &[]);
        assert_eq!(cart.total_price(), Money::from_centavos(i64::MAX));
    }

    #[test]
    fn test_non_positive_add_is_ignored() {
        let mut cart = Cart::new();
        cart.add_to_cart(&rice(), 0, None, &[]);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_of_ignores_customized_lines() {
        let mut cart = Cart::new();
        let item = pares();
        cart.add_to_cart(&item, 4, item.find_variation("large"), &[]);
        assert_eq!(cart.quantity_of("pares"), 0);

        cart.add_to_cart(&item, 1, None, &[]);
        assert_eq!(cart.quantity_of("pares"), 1);
        assert!(cart.get("pares").map(CartItem::is_plain).unwrap_or(false));
    }

    #[test]
    fn test_separator_ids_do_not_collide() {
        let mut cart = Cart::new();
        let item = pares();
        let mami = MenuItem::new("pares:large:", "Mami", Money::from_pesos(90), "mains");

        let large_key = cart.add_to_cart(&item, 1, item.find_variation("large"), &[]);
        let mami_key = cart.add_to_cart(&mami, 1, None, &[]);

        assert_ne!(large_key, mami_key);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[1].name, "Mami");
        assert_eq!(cart.total_price(), Money::from_pesos(240));
        assert_eq!(cart.quantity_of("pares:large:"), 1);
        assert_eq!(cart.quantity_of("pares"), 0);
    }

    #[test]
    fn test_escaped_option_ids() {
        // A variation literally named "-" is not "no variation".
        let dash = Variation::new("-", "Dash", Money::zero());
        let egg = selected(&pares(), "egg", 1);
        assert_eq!(cart_key("pares", Some(&dash), &[egg.clone()]), "pares:%2D:egg*1");
        assert_eq!(cart_key("pares", None, &[egg]), "pares:-:egg*1");

        let odd = AddOn::new("egg*2,rice", "Odd Egg", "Extras", Money::zero());
        let key = cart_key("pares", None, &[SelectedAddOn::new(&odd, 1)]);
        assert_eq!(key, "pares:-:egg%2A2%2Crice*1");
    }

    #[test]
    fn test_line_keeps_selection_order() {
        let mut cart = Cart::new();
        let item = pares();
        let garlic = selected(&item, "garlic", 1);
        let egg = selected(&item, "egg", 2);

        let key = cart.add_to_cart(&item, 1, None, &[garlic, egg]);

        assert_eq!(key, "pares:-:egg*2,garlic*1");
        let ids: Vec<&str> = cart.items()[0].selected_add_ons.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["garlic", "egg"]);
    }
}
