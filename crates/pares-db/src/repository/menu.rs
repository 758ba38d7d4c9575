//! # Menu Item Repository
//!
//! Menu items with their variations and add-ons.
//!
//! ## Table Layout
//! ```text
//! ┌───────────────────┐       ┌───────────────────┐
//! │    menu_items     │ 1   * │    variations     │
//! │  id (PK)          │──────►│  menu_item_id (FK)│
//! │  base_price_...   │       │  id, name, price  │
//! │  discount_...     │       └───────────────────┘
//! │  category_id (FK) │ 1   * ┌───────────────────┐
//! │                   │──────►│      add_ons      │
//! └───────────────────┘       │  menu_item_id (FK)│
//!                             │  id, category, ...│
//!                             └───────────────────┘
//! ```
//!
//! Items are written in one transaction together with their options, after
//! [`validate_menu_item`] has accepted them.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use pares_core::money::Money;
use pares_core::types::{AddOn, MenuItem, Variation};
use pares_core::validation::validate_menu_item;

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct MenuItemRow {
    id: String,
    name: String,
    description: String,
    base_price_centavos: i64,
    discount_price_centavos: Option<i64>,
    discount_active: bool,
    available: bool,
    popular: bool,
    category_id: String,
    image_url: Option<String>,
}

impl MenuItemRow {
    fn into_item(self, variations: Vec<Variation>, add_ons: Vec<AddOn>) -> MenuItem {
        MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            base_price: Money::from_centavos(self.base_price_centavos),
            discount_price: self.discount_price_centavos.map(Money::from_centavos),
            is_on_discount: self.discount_active,
            available: self.available,
            popular: self.popular,
            category: self.category_id,
            image: self.image_url,
            variations,
            add_ons,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VariationRow {
    menu_item_id: String,
    id: String,
    name: String,
    price_centavos: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct AddOnRow {
    menu_item_id: String,
    id: String,
    name: String,
    category: String,
    price_centavos: i64,
}

const ITEM_COLUMNS: &str = r#"
    id, name, description, base_price_centavos, discount_price_centavos,
    discount_active, available, popular, category_id, image_url
"#;

// =============================================================================
// Repository
// =============================================================================

/// Repository for menu items.
#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MenuItemRepository { pool }
    }

    /// Every menu item, available or not, with options in their stored order.
    pub async fn list_all(&self) -> DbResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {} FROM menu_items ORDER BY sort_order, name",
            ITEM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut variations: HashMap<String, Vec<Variation>> = HashMap::new();
        for row in sqlx::query_as::<_, VariationRow>(
            r#"
            SELECT menu_item_id, id, name, price_centavos
            FROM variations
            ORDER BY menu_item_id, sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        {
            variations
                .entry(row.menu_item_id)
                .or_default()
                .push(Variation::new(row.id, row.name, Money::from_centavos(row.price_centavos)));
        }

        let mut add_ons: HashMap<String, Vec<AddOn>> = HashMap::new();
        for row in sqlx::query_as::<_, AddOnRow>(
            r#"
            SELECT menu_item_id, id, name, category, price_centavos
            FROM add_ons
            ORDER BY menu_item_id, sort_order
            "#,
        )
        .fetch_all(&self.pool)
        .await?
        {
            add_ons.entry(row.menu_item_id).or_default().push(AddOn::new(
                row.id,
                row.name,
                row.category,
                Money::from_centavos(row.price_centavos),
            ));
        }

        let items: Vec<MenuItem> = rows
            .into_iter()
            .map(|row| {
                let v = variations.remove(&row.id).unwrap_or_default();
                let a = add_ons.remove(&row.id).unwrap_or_default();
                row.into_item(v, a)
            })
            .collect();

        debug!(count = items.len(), "Loaded menu items");
        Ok(items)
    }

    /// One menu item with its options.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {} FROM menu_items WHERE id = ?1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let variations = sqlx::query_as::<_, VariationRow>(
            r#"
            SELECT menu_item_id, id, name, price_centavos
            FROM variations WHERE menu_item_id = ?1
            ORDER BY sort_order
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| Variation::new(r.id, r.name, Money::from_centavos(r.price_centavos)))
        .collect();

        let add_ons = sqlx::query_as::<_, AddOnRow>(
            r#"
            SELECT menu_item_id, id, name, category, price_centavos
            FROM add_ons WHERE menu_item_id = ?1
            ORDER BY sort_order
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|r| AddOn::new(r.id, r.name, r.category, Money::from_centavos(r.price_centavos)))
        .collect();

        Ok(Some(row.into_item(variations, add_ons)))
    }

    /// Inserts an item with its variations and add-ons.
    ///
    /// `sort_order` positions the item on the menu; options keep the order of
    /// the vectors.
    ///
    /// ## Errors
    /// - `Invalid` if [`validate_menu_item`] rejects the item
    /// - `ForeignKeyViolation` if the category does not exist
    /// - `UniqueViolation` on a duplicate item or option id
    pub async fn insert(&self, item: &MenuItem, sort_order: i64) -> DbResult<()> {
        validate_menu_item(item)?;

        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO menu_items (
                id, name, description, base_price_centavos, discount_price_centavos,
                discount_active, available, popular, category_id, image_url, sort_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.base_price.centavos())
        .bind(item.discount_price.map(|m| m.centavos()))
        .bind(item.is_on_discount)
        .bind(item.available)
        .bind(item.popular)
        .bind(&item.category)
        .bind(&item.image)
        .bind(sort_order)
        .execute(&mut *tx)
        .await?;

        for (position, variation) in item.variations.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO variations (menu_item_id, id, name, price_centavos, sort_order)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&item.id)
            .bind(&variation.id)
            .bind(&variation.name)
            .bind(variation.price.centavos())
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        for (position, add_on) in item.add_ons.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO add_ons (menu_item_id, id, name, category, price_centavos, sort_order)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&item.id)
            .bind(&add_on.id)
            .bind(&add_on.name)
            .bind(&add_on.category)
            .bind(add_on.price.centavos())
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Marks an item sold out (or back in stock).
    pub async fn set_available(&self, id: &str, available: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE menu_items SET available = ?1 WHERE id = ?2")
            .bind(available)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("MenuItem", id));
        }

        info!(id = %id, available, "Menu item availability changed");
        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use pares_core::types::Category;
    use pares_core::ValidationError;

    async fn db_with_category() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories()
            .insert(&Category::new("mains", "Pares", "🍲"))
            .await
            .unwrap();
        db
    }

    fn pares() -> MenuItem {
        MenuItem::new("pares", "Beef Pares", Money::from_pesos(150), "mains")
            .with_discount(Money::from_pesos(120))
            .with_variations(vec![
                Variation::new("regular", "Regular", Money::zero()),
                Variation::new("large", "Large", Money::from_pesos(30)),
            ])
            .with_add_ons(vec![
                AddOn::new("egg", "Egg", "Extras", Money::from_pesos(15)),
                AddOn::new("garlic", "Garlic Rice", "Rice", Money::from_pesos(25)),
            ])
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let db = db_with_category().await;
        let repo = db.menu_items();
        let item = pares();

        repo.insert(&item, 0).await.unwrap();

        let loaded = repo.get_by_id("pares").await.unwrap().unwrap();
        assert_eq!(loaded, item);
        assert!(repo.get_by_id("lomi").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_groups_options_per_item() {
        let db = db_with_category().await;
        let repo = db.menu_items();

        repo.insert(&pares(), 1).await.unwrap();
        // Same option ids on another item are fine.
        let mami = MenuItem::new("mami", "Pares Mami", Money::from_pesos(130), "mains")
            .with_add_ons(vec![AddOn::new("egg", "Egg", "Extras", Money::from_pesos(15))]);
        repo.insert(&mami, 0).await.unwrap();

        let items = repo.list_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "mami");
        assert_eq!(items[0].add_ons.len(), 1);
        assert!(items[0].variations.is_empty());
        assert_eq!(items[1].variations[1].id, "large");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_discount() {
        let db = db_with_category().await;
        let bad = MenuItem::new("pares", "Beef Pares", Money::from_pesos(100), "mains")
            .with_discount(Money::from_pesos(100));

        let err = db.menu_items().insert(&bad, 0).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Invalid(ValidationError::DiscountNotLower { .. })
        ));
        assert_eq!(db.menu_items().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let db = db_with_category().await;
        let orphan = MenuItem::new("lugaw", "Lugaw", Money::from_pesos(50), "soups");

        let err = db.menu_items().insert(&orphan, 0).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_set_available() {
        let db = db_with_category().await;
        let repo = db.menu_items();
        repo.insert(&pares(), 0).await.unwrap();

        repo.set_available("pares", false).await.unwrap();
        assert!(!repo.get_by_id("pares").await.unwrap().unwrap().available);

        let err = repo.set_available("lomi", false).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
