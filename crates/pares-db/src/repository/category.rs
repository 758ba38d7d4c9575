//! Category repository.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pares_core::types::Category;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    icon: String,
    sort_order: i64,
    active: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
            icon: row.icon,
            sort_order: row.sort_order,
            active: row.active,
        }
    }
}

/// Repository for menu categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Active categories in display order.
    pub async fn list_active(&self) -> DbResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, icon, sort_order, active
            FROM categories
            WHERE active = 1
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded categories");
        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, "Inserting category");

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, icon, sort_order, active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.icon)
        .bind(category.sort_order)
        .bind(category.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::{Database, DbConfig};
    use pares_core::types::Category;

    #[tokio::test]
    async fn test_list_active_in_sort_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        let mut drinks = Category::new("drinks", "Drinks", "🥤");
        drinks.sort_order = 2;
        let mut mains = Category::new("mains", "Pares", "🍲");
        mains.sort_order = 1;
        let mut hidden = Category::new("secret", "Secret Menu", "🤫");
        hidden.active = false;

        for c in [&drinks, &mains, &hidden] {
            repo.insert(c).await.unwrap();
        }

        let listed = repo.list_active().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["mains", "drinks"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mains = Category::new("mains", "Pares", "🍲");
        db.categories().insert(&mains).await.unwrap();

        let err = db.categories().insert(&mains).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
