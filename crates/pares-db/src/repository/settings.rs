//! Site settings repository (single row, `id = 1`).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};
use pares_core::types::SiteSettings;

#[derive(Debug, sqlx::FromRow)]
struct SiteSettingsRow {
    store_name: String,
    logo_url: Option<String>,
    store_open: bool,
    closed_message: String,
}

impl From<SiteSettingsRow> for SiteSettings {
    fn from(row: SiteSettingsRow) -> Self {
        SiteSettings {
            store_name: row.store_name,
            logo_url: row.logo_url,
            store_open: row.store_open,
            closed_message: row.closed_message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteSettingsRepository {
    pool: SqlitePool,
}

impl SiteSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SiteSettingsRepository { pool }
    }

    /// `None` until settings have been saved once.
    pub async fn get(&self) -> DbResult<Option<SiteSettings>> {
        let row = sqlx::query_as::<_, SiteSettingsRow>(
            "SELECT store_name, logo_url, store_open, closed_message FROM site_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SiteSettings::from))
    }

    /// Inserts or replaces the settings row.
    pub async fn save(&self, settings: &SiteSettings) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO site_settings (id, store_name, logo_url, store_open, closed_message, updated_at)
            VALUES (1, ?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                store_name = excluded.store_name,
                logo_url = excluded.logo_url,
                store_open = excluded.store_open,
                closed_message = excluded.closed_message,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&settings.store_name)
        .bind(&settings.logo_url)
        .bind(settings.store_open)
        .bind(&settings.closed_message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!(store = %settings.store_name, open = settings.store_open, "Site settings saved");
        Ok(())
    }

    /// Flips the open/closed switch.
    pub async fn set_store_open(&self, open: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE site_settings SET store_open = ?1, updated_at = ?2 WHERE id = 1")
            .bind(open)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("SiteSettings", "1"));
        }

        info!(open, "Store open state changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_settings_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.site_settings();

        assert!(repo.get().await.unwrap().is_none());
        assert!(matches!(
            repo.set_store_open(false).await,
            Err(DbError::NotFound { .. })
        ));

        let settings = SiteSettings {
            store_name: "Primos' Pares".to_string(),
            logo_url: Some("https://example.com/logo.png".to_string()),
            store_open: true,
            closed_message: "Balik kami bukas!".to_string(),
        };
        repo.save(&settings).await.unwrap();
        assert_eq!(repo.get().await.unwrap(), Some(settings.clone()));

        repo.set_store_open(false).await.unwrap();
        let closed = repo.get().await.unwrap().unwrap();
        assert!(!closed.store_open);
        assert_eq!(closed.closed_message, settings.closed_message);

        // Saving again replaces the single row.
        repo.save(&SiteSettings::default()).await.unwrap();
        assert_eq!(repo.get().await.unwrap(), Some(SiteSettings::default()));
    }
}
