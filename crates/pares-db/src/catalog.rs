//! [`CatalogProvider`] backed by the SQLite catalog.

use async_trait::async_trait;
use tracing::warn;

use crate::pool::Database;
use pares_core::catalog::CatalogProvider;
use pares_core::types::{Category, MenuItem, PaymentMethod, SiteSettings};
use pares_core::CoreResult;

/// Serves the storefront catalog from [`Database`].
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db: Database,
}

impl SqliteCatalog {
    pub fn new(db: Database) -> Self {
        SqliteCatalog { db }
    }
}

#[async_trait]
impl CatalogProvider for SqliteCatalog {
    async fn menu_items(&self) -> CoreResult<Vec<MenuItem>> {
        self.db.menu_items().list_all().await.map_err(|e| {
            warn!(error = %e, "Failed to load menu items");
            e.into()
        })
    }

    async fn categories(&self) -> CoreResult<Vec<Category>> {
        self.db.categories().list_active().await.map_err(|e| {
            warn!(error = %e, "Failed to load categories");
            e.into()
        })
    }

    async fn payment_methods(&self) -> CoreResult<Vec<PaymentMethod>> {
        self.db.payment_methods().list_active().await.map_err(|e| {
            warn!(error = %e, "Failed to load payment methods");
            e.into()
        })
    }

    async fn site_settings(&self) -> CoreResult<Option<SiteSettings>> {
        self.db.site_settings().get().await.map_err(|e| {
            warn!(error = %e, "Failed to load site settings");
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use pares_core::catalog::load_snapshot;
    use pares_core::money::Money;
    use pares_core::CoreError;

    #[tokio::test]
    async fn test_snapshot_from_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories()
            .insert(&Category::new("mains", "Pares", "🍲"))
            .await
            .unwrap();
        db.menu_items()
            .insert(&MenuItem::new("pares", "Beef Pares", Money::from_pesos(120), "mains"), 0)
            .await
            .unwrap();
        db.payment_methods()
            .insert(&PaymentMethod::new("gcash", "GCash", "0917", "Primo"))
            .await
            .unwrap();

        let loaded = load_snapshot(&SqliteCatalog::new(db)).await;

        assert!(loaded.failures.is_empty());
        assert_eq!(loaded.snapshot.menu_items.len(), 1);
        assert_eq!(loaded.snapshot.categories.len(), 1);
        assert_eq!(loaded.snapshot.payment_methods[0].id, "gcash");
        assert!(loaded.snapshot.site_settings.is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_reports_unavailable() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let loaded = load_snapshot(&SqliteCatalog::new(db)).await;
        assert_eq!(loaded.failures.len(), 4);
        assert!(loaded
            .failures
            .iter()
            .all(|e| matches!(e, CoreError::CatalogUnavailable(_))));
        assert!(loaded.snapshot.menu_items.is_empty());
    }
}
