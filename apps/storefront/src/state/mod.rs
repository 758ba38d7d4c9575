//! # State Module
//!
//! Shared state handed to every route through axum's `State` extractor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppState (Clone)                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┬──────────────┐        │
//! │          ▼                  ▼                  ▼              ▼         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌──────────┐    │
//! │  │ CatalogStore │  │ SessionStore │  │ Storefront   │  │ Database │    │
//! │  │              │  │              │  │ Config       │  │ (opt.)   │    │
//! │  │ Arc<RwLock<  │  │ Arc<Mutex<   │  │ Arc, read-   │  │ health   │    │
//! │  │ CatalogState │  │ HashMap<..>  │  │ only         │  │ checks   │    │
//! │  │ >>           │  │ >>           │  │              │  │          │    │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └──────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogStore: many readers, refresh swaps the snapshot              │
//! │  • SessionStore: exclusive access per call, idle sessions swept        │
//! │  • Config: read-only after startup                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod session;

use std::sync::Arc;

use pares_core::catalog::{CatalogProvider, CatalogSnapshot};
use pares_core::handoff::HandoffConfig;
use pares_db::Database;

use crate::config::StorefrontConfig;

pub use catalog::{CatalogStore, RefreshSummary};
pub use session::{Session, SessionStore, DEFAULT_IDLE_TTL};

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub sessions: SessionStore,
    pub config: Arc<StorefrontConfig>,
    db: Option<Database>,
}

impl AppState {
    /// The catalog starts loading; call `catalog.refresh()` before serving.
    pub fn new(config: StorefrontConfig, provider: Arc<dyn CatalogProvider>) -> Self {
        AppState {
            catalog: CatalogStore::new(provider),
            sessions: SessionStore::with_idle_ttl(config.sessions.idle_ttl()),
            config: Arc::new(config),
            db: None,
        }
    }

    /// Attaches the catalog database so `/health` can probe it.
    pub fn with_database(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }

    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    pub fn handoff(&self) -> HandoffConfig {
        self.config.handoff()
    }

    /// Store name from site settings, or the configured fallback.
    pub fn store_name(&self, snapshot: &CatalogSnapshot) -> String {
        snapshot
            .site_settings
            .as_ref()
            .map(|s| s.store_name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(self.config.store.fallback_name.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pares_core::catalog::InMemoryCatalog;
    use pares_core::types::SiteSettings;

    #[test]
    fn test_store_name_falls_back_to_config() {
        let mut config = StorefrontConfig::default();
        config.store.fallback_name = "Pares ni Kuya".to_string();
        let state = AppState::new(config, Arc::new(InMemoryCatalog::new()));

        let mut snapshot = CatalogSnapshot::default();
        assert_eq!(state.store_name(&snapshot), "Pares ni Kuya");

        snapshot.site_settings = Some(SiteSettings {
            store_name: "  ".to_string(),
            ..SiteSettings::default()
        });
        assert_eq!(state.store_name(&snapshot), "Pares ni Kuya");

        snapshot.site_settings = Some(SiteSettings {
            store_name: "Primos' Pares QC".to_string(),
            ..SiteSettings::default()
        });
        assert_eq!(state.store_name(&snapshot), "Primos' Pares QC");
    }
}
