//! # Catalog Provider
//!
//! Read-only source of menu items, categories, payment methods and site
//! settings, plus the snapshot the storefront serves from.
//!
//! ## Loading Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CatalogState::Loading ──── load_snapshot(provider) ────► Ready(snap) │
//! │                                     │                                   │
//! │                  each list fetched independently; a failed list         │
//! │                  becomes empty and is reported in `failures`            │
//! │                                                                         │
//! │   Providers:                                                            │
//! │   ├── InMemoryCatalog   (this module; tests, demos)                    │
//! │   └── SqliteCatalog     (pares-db)                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, MenuItem, PaymentMethod, SiteSettings};
use crate::DEFAULT_STORE_NAME;

/// Shown when the store is closed without a custom message.
pub const DEFAULT_CLOSED_MESSAGE: &str = "Our restaurant is currently closed.";

// =============================================================================
// Provider Trait
// =============================================================================

/// Where catalog data comes from.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn menu_items(&self) -> CoreResult<Vec<MenuItem>>;

    async fn categories(&self) -> CoreResult<Vec<Category>>;

    async fn payment_methods(&self) -> CoreResult<Vec<PaymentMethod>>;

    /// `None` while the store has not been configured yet.
    async fn site_settings(&self) -> CoreResult<Option<SiteSettings>>;
}

// =============================================================================
// Snapshot
// =============================================================================

/// Catalog data as of the last load.
///
/// Inactive categories and payment methods are dropped; both lists are
/// ordered by `sort_order`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub menu_items: Vec<MenuItem>,
    pub categories: Vec<Category>,
    pub payment_methods: Vec<PaymentMethod>,
    pub site_settings: Option<SiteSettings>,
}

impl CatalogSnapshot {
    pub fn new(
        menu_items: Vec<MenuItem>,
        mut categories: Vec<Category>,
        mut payment_methods: Vec<PaymentMethod>,
        site_settings: Option<SiteSettings>,
    ) -> Self {
        categories.retain(|c| c.active);
        categories.sort_by_key(|c| c.sort_order);
        payment_methods.retain(|m| m.active);
        payment_methods.sort_by_key(|m| m.sort_order);

        CatalogSnapshot {
            menu_items,
            categories,
            payment_methods,
            site_settings,
        }
    }

    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu_items.iter().find(|item| item.id == id)
    }

    /// Looks up an item that can be ordered right now.
    ///
    /// ## Errors
    /// - `MenuItemNotFound` if the id is unknown
    /// - `ItemUnavailable` if the item is marked unavailable
    pub fn orderable_item(&self, id: &str) -> CoreResult<&MenuItem> {
        let item = self
            .find_item(id)
            .ok_or_else(|| CoreError::MenuItemNotFound(id.to_string()))?;
        if !item.available {
            return Err(CoreError::ItemUnavailable {
                name: item.name.clone(),
            });
        }
        Ok(item)
    }

    pub fn store_name(&self) -> &str {
        self.site_settings
            .as_ref()
            .map(|s| s.store_name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_STORE_NAME)
    }

    /// Unconfigured stores count as open.
    pub fn is_store_open(&self) -> bool {
        self.site_settings.as_ref().map_or(true, |s| s.store_open)
    }

    /// Fails with `StoreClosed` carrying the closed message when ordering is
    /// switched off.
    pub fn ensure_open(&self) -> CoreResult<()> {
        match &self.site_settings {
            Some(settings) if !settings.store_open => Err(CoreError::StoreClosed {
                message: if settings.closed_message.trim().is_empty() {
                    DEFAULT_CLOSED_MESSAGE.to_string()
                } else {
                    settings.closed_message.clone()
                },
            }),
            _ => Ok(()),
        }
    }
}

/// Loading state as the UI sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready(CatalogSnapshot),
}

impl CatalogState {
    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        match self {
            CatalogState::Loading => None,
            CatalogState::Ready(snapshot) => Some(snapshot),
        }
    }
}

/// Result of a load: the snapshot plus every list that failed.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub snapshot: CatalogSnapshot,
    pub failures: Vec<CoreError>,
}

/// Fetches everything from a provider. Never fails: a list that errors is
/// served as empty and reported in [`LoadedCatalog::failures`].
pub async fn load_snapshot(provider: &dyn CatalogProvider) -> LoadedCatalog {
    let mut failures = Vec::new();

    let menu_items = provider.menu_items().await.unwrap_or_else(|e| {
        failures.push(e);
        Vec::new()
    });
    let categories = provider.categories().await.unwrap_or_else(|e| {
        failures.push(e);
        Vec::new()
    });
    let payment_methods = provider.payment_methods().await.unwrap_or_else(|e| {
        failures.push(e);
        Vec::new()
    });
    let site_settings = provider.site_settings().await.unwrap_or_else(|e| {
        failures.push(e);
        None
    });

    LoadedCatalog {
        snapshot: CatalogSnapshot::new(menu_items, categories, payment_methods, site_settings),
        failures,
    }
}

// =============================================================================
// In-Memory Provider
// =============================================================================

/// A fixed catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    pub menu_items: Vec<MenuItem>,
    pub categories: Vec<Category>,
    pub payment_methods: Vec<PaymentMethod>,
    pub site_settings: Option<SiteSettings>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog::default()
    }

    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.menu_items = items;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_payment_methods(mut self, methods: Vec<PaymentMethod>) -> Self {
        self.payment_methods = methods;
        self
    }

    pub fn with_settings(mut self, settings: SiteSettings) -> Self {
        self.site_settings = Some(settings);
        self
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn menu_items(&self) -> CoreResult<Vec<MenuItem>> {
        Ok(self.menu_items.clone())
    }

    async fn categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn payment_methods(&self) -> CoreResult<Vec<PaymentMethod>> {
        Ok(self.payment_methods.clone())
    }

    async fn site_settings(&self) -> CoreResult<Option<SiteSettings>> {
        Ok(self.site_settings.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
