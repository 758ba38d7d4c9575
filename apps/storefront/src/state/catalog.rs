//! # Catalog State
//!
//! The menu, categories, payment methods and site settings as last loaded
//! from the [`CatalogProvider`].
//!
//! ## Lifecycle
//! ```text
//! startup ──► Loading ──► refresh() ──► Ready(snapshot) ──► refresh() ──► Ready(..)
//!                 │
//!                 └── routes answer CATALOG_UNAVAILABLE / loading placeholders
//! ```
//!
//! A refresh never fails: lists the provider cannot deliver are served empty
//! and logged.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use tracing::{info, warn};

use pares_core::catalog::{load_snapshot, CatalogProvider, CatalogSnapshot, CatalogState};
use pares_core::types::PaymentMethod;

use crate::error::{ApiError, ApiResult};

/// Counts reported after a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub menu_items: usize,
    pub categories: usize,
    pub payment_methods: usize,
    pub settings_loaded: bool,
    pub failures: Vec<String>,
}

#[derive(Clone)]
pub struct CatalogStore {
    provider: Arc<dyn CatalogProvider>,
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogStore {
    /// Starts in the loading state; call [`CatalogStore::refresh`] to load.
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        CatalogStore {
            provider,
            state: Arc::new(RwLock::new(CatalogState::Loading)),
        }
    }

    /// Reloads everything from the provider and swaps the snapshot in.
    pub async fn refresh(&self) -> RefreshSummary {
        let loaded = load_snapshot(self.provider.as_ref()).await;

        for failure in &loaded.failures {
            warn!(error = %failure, "Catalog list failed to load, serving it empty");
        }

        let snapshot = loaded.snapshot;
        let summary = RefreshSummary {
            menu_items: snapshot.menu_items.len(),
            categories: snapshot.categories.len(),
            payment_methods: snapshot.payment_methods.len(),
            settings_loaded: snapshot.site_settings.is_some(),
            failures: loaded.failures.iter().map(|e| e.to_string()).collect(),
        };

        *self.state.write().unwrap_or_else(PoisonError::into_inner) = CatalogState::Ready(snapshot);

        info!(
            menu_items = summary.menu_items,
            categories = summary.categories,
            payment_methods = summary.payment_methods,
            failures = summary.failures.len(),
            "Catalog refreshed"
        );
        summary
    }

    pub fn is_loading(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_loading()
    }

    /// Runs `f` against the loaded snapshot.
    ///
    /// ## Errors
    /// `CATALOG_UNAVAILABLE` while still loading, or whatever `f` returns.
    pub fn with_snapshot<F, R>(&self, f: F) -> ApiResult<R>
    where
        F: FnOnce(&CatalogSnapshot) -> ApiResult<R>,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match state.snapshot() {
            Some(snapshot) => f(snapshot),
            None => Err(ApiError::catalog_loading()),
        }
    }

    /// Active payment methods; empty while loading.
    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
            .map(|s| s.payment_methods.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("loading", &self.is_loading())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pares_core::catalog::InMemoryCatalog;
    use pares_core::money::Money;
    use pares_core::types::{Category, MenuItem, SiteSettings};
    use pares_core::{CoreError, CoreResult};

    struct NoPayments;

    #[async_trait]
    impl CatalogProvider for NoPayments {
        async fn menu_items(&self) -> CoreResult<Vec<MenuItem>> {
            Ok(vec![MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains")])
        }

        async fn categories(&self) -> CoreResult<Vec<Category>> {
            Ok(vec![Category::new("mains", "Pares", "🍲")])
        }

        async fn payment_methods(&self) -> CoreResult<Vec<PaymentMethod>> {
            Err(CoreError::CatalogUnavailable("payment_methods offline".to_string()))
        }

        async fn site_settings(&self) -> CoreResult<Option<SiteSettings>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_loading_until_refreshed() {
        let store = CatalogStore::new(Arc::new(InMemoryCatalog::new()));
        assert!(store.is_loading());
        assert!(store.payment_methods().is_empty());

        let err = store.with_snapshot(|_| Ok(())).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::CatalogUnavailable);

        store.refresh().await;
        assert!(!store.is_loading());
        assert!(store.with_snapshot(|s| Ok(s.menu_items.is_empty())).unwrap());
    }

    #[tokio::test]
    async fn test_failed_list_served_empty() {
        let store = CatalogStore::new(Arc::new(NoPayments));
        let summary = store.refresh().await;

        assert_eq!(summary.menu_items, 1);
        assert_eq!(summary.payment_methods, 0);
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].contains("payment_methods offline"));
        assert!(!summary.settings_loaded);
        assert!(!store.is_loading());
    }
}
