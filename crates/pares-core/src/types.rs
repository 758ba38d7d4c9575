//! # Domain Types
//!
//! Catalog and fulfillment types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │    Variation    │   │     AddOn       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id             │   │  id             │       │
//! │  │  base_price     │   │  name           │   │  category tag   │       │
//! │  │  discount_price │   │  price (delta)  │   │  price (delta)  │       │
//! │  │  variations[]   │   └─────────────────┘   └────────┬────────┘       │
//! │  │  add_ons[] ─────┼──────────────────────────────────┘                │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │  PaymentMethod  │   │  SiteSettings   │       │
//! │  │  id, icon       │   │  account, QR    │   │  open / closed  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │   ServiceType   │   │  PickupWindow   │   (checkout choices)        │
//! │  │  dine-in        │   │  5-10 / 15-20   │                              │
//! │  │  pickup         │   │  25-30 / custom │                              │
//! │  │  delivery       │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All catalog data comes from a [`crate::catalog::CatalogProvider`]; the core
//! never writes it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_STORE_NAME;

// =============================================================================
// Variation
// =============================================================================

/// A mutually exclusive size/style option; `price` is added to the item's
/// effective base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: String,
    pub name: String,
    pub price: Money,
}

impl Variation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Variation {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

// =============================================================================
// Add-on
// =============================================================================

/// An optional extra, grouped on the menu by its `category` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
}

impl AddOn {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        AddOn {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

/// An add-on chosen for a cart line, with how many of it.
///
/// A quantity of 0 means "not selected" and never survives canonicalisation
/// in [`crate::cart::CartKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectedAddOn {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Money,
    pub quantity: u32,
}

impl SelectedAddOn {
    /// Snapshots an add-on with a selection quantity.
    pub fn new(add_on: &AddOn, quantity: u32) -> Self {
        SelectedAddOn {
            id: add_on.id.clone(),
            name: add_on.name.clone(),
            category: add_on.category.clone(),
            price: add_on.price,
            quantity,
        }
    }

    /// `price × quantity`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.price.multiply_quantity(self.quantity as i64)
    }

    /// How the add-on reads on a cart line: `Egg` or `Egg x2`.
    pub fn display_token(&self) -> String {
        if self.quantity > 1 {
            format!("{} x{}", self.name, self.quantity)
        } else {
            self.name.clone()
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish on the menu.
///
/// ## Invariant
/// When `is_on_discount` is set, `discount_price` must be below `base_price`.
/// Checked by [`crate::validation::validate_menu_item`] before catalog writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Money,
    #[serde(default)]
    pub discount_price: Option<Money>,
    #[serde(default)]
    pub is_on_discount: bool,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub popular: bool,
    /// Category id this item is listed under.
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Ordered; the first one is preselected in the customize dialog.
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Creates an available, undiscounted item with no options.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_price: Money,
        category: impl Into<String>,
    ) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            base_price,
            discount_price: None,
            is_on_discount: false,
            available: true,
            popular: false,
            category: category.into(),
            image: None,
            variations: Vec::new(),
            add_ons: Vec::new(),
        }
    }

    /// Puts the item on discount at `price`.
    pub fn with_discount(mut self, price: Money) -> Self {
        self.discount_price = Some(price);
        self.is_on_discount = true;
        self
    }

    pub fn with_variations(mut self, variations: Vec<Variation>) -> Self {
        self.variations = variations;
        self
    }

    pub fn with_add_ons(mut self, add_ons: Vec<AddOn>) -> Self {
        self.add_ons = add_ons;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the item unavailable (sold out for the day).
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// True when the discount flag is on and a discount price exists.
    #[inline]
    pub fn is_discounted(&self) -> bool {
        self.is_on_discount && self.discount_price.is_some()
    }

    /// The price customizations are added to: the discount price while on
    /// discount, the base price otherwise.
    pub fn effective_price(&self) -> Money {
        match self.discount_price {
            Some(discount) if self.is_on_discount => discount,
            _ => self.base_price,
        }
    }

    /// Amount saved by the discount, for the "Save ₱X" label.
    pub fn savings(&self) -> Option<Money> {
        if self.is_discounted() {
            Some(self.base_price - self.effective_price())
        } else {
            None
        }
    }

    /// Rounded percentage for the "N% OFF" badge.
    pub fn discount_percent(&self) -> Option<i64> {
        if self.is_discounted() {
            Some(self.base_price.percent_off(self.effective_price()))
        } else {
            None
        }
    }

    /// Items with any variation or add-on open the customize dialog instead
    /// of going straight into the cart.
    #[inline]
    pub fn requires_customization(&self) -> bool {
        !self.variations.is_empty() || !self.add_ons.is_empty()
    }

    /// The menu prints "Starting price" under items that come in sizes.
    #[inline]
    pub fn has_starting_price(&self) -> bool {
        !self.variations.is_empty()
    }

    /// The variation preselected in the customize dialog.
    pub fn default_variation(&self) -> Option<&Variation> {
        self.variations.first()
    }

    pub fn find_variation(&self, id: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.id == id)
    }

    pub fn find_add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A menu section, e.g. "Pares" or "Drinks".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Category {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            sort_order: 0,
            active: true,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// A manual payment channel (e.g. GCash) the customer pays into before
/// sending a screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub account_name: String,
    #[serde(default)]
    pub qr_code_url: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub sort_order: i64,
}

impl PaymentMethod {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        account_number: impl Into<String>,
        account_name: impl Into<String>,
    ) -> Self {
        PaymentMethod {
            id: id.into(),
            name: name.into(),
            account_number: account_number.into(),
            account_name: account_name.into(),
            qr_code_url: String::new(),
            active: true,
            sort_order: 0,
        }
    }
}

// =============================================================================
// Site Settings
// =============================================================================

/// Store branding and the open/closed switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub store_name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default = "default_true")]
    pub store_open: bool,
    /// Shown in the closed overlay.
    #[serde(default)]
    pub closed_message: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            store_name: DEFAULT_STORE_NAME.to_string(),
            logo_url: None,
            store_open: true,
            closed_message: String::new(),
        }
    }
}

// =============================================================================
// Service Type
// =============================================================================

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Eat at the store; needs party size and a preferred time.
    #[default]
    DineIn,
    /// Customer collects; needs a pickup window.
    Pickup,
    /// Rider brings it; needs an address.
    Delivery,
}

impl ServiceType {
    /// Wire value: `dine-in`, `pickup`, `delivery`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::DineIn => "dine-in",
            ServiceType::Pickup => "pickup",
            ServiceType::Delivery => "delivery",
        }
    }

    /// Wire value with the first letter capitalised, as the summary shows it.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::DineIn => "Dine-in",
            ServiceType::Pickup => "Pickup",
            ServiceType::Delivery => "Delivery",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dine-in" | "dinein" | "dine_in" => Ok(ServiceType::DineIn),
            "pickup" => Ok(ServiceType::Pickup),
            "delivery" => Ok(ServiceType::Delivery),
            other => Err(ValidationError::InvalidFormat {
                field: "service type".to_string(),
                reason: format!("unknown service type '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Pickup Window
// =============================================================================

/// Pickup time choice. Every choice except `Custom` is complete on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PickupWindow {
    #[default]
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "15-20")]
    FifteenToTwenty,
    #[serde(rename = "25-30")]
    TwentyFiveToThirty,
    #[serde(rename = "custom")]
    Custom,
}

impl PickupWindow {
    /// All choices in the order the picker shows them.
    pub const ALL: [PickupWindow; 4] = [
        PickupWindow::FiveToTen,
        PickupWindow::FifteenToTwenty,
        PickupWindow::TwentyFiveToThirty,
        PickupWindow::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupWindow::FiveToTen => "5-10",
            PickupWindow::FifteenToTwenty => "15-20",
            PickupWindow::TwentyFiveToThirty => "25-30",
            PickupWindow::Custom => "custom",
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, PickupWindow::Custom)
    }
}

impl fmt::Display for PickupWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PickupWindow::ALL
            .into_iter()
            .find(|w| w.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "pickup time".to_string(),
                reason: format!("unknown pickup window '{}'", s),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
