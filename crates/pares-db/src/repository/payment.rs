//! Payment method repository.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use pares_core::types::PaymentMethod;

#[derive(Debug, sqlx::FromRow)]
struct PaymentMethodRow {
    id: String,
    name: String,
    account_number: String,
    account_name: String,
    qr_code_url: String,
    active: bool,
    sort_order: i64,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        PaymentMethod {
            id: row.id,
            name: row.name,
            account_number: row.account_number,
            account_name: row.account_name,
            qr_code_url: row.qr_code_url,
            active: row.active,
            sort_order: row.sort_order,
        }
    }
}

/// Repository for manual payment channels (GCash, Maya, bank transfer).
#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    pool: SqlitePool,
}

impl PaymentMethodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PaymentMethodRepository { pool }
    }

    /// Active methods in display order. The first one is the checkout default.
    pub async fn list_active(&self) -> DbResult<Vec<PaymentMethod>> {
        let rows = sqlx::query_as::<_, PaymentMethodRow>(
            r#"
            SELECT id, name, account_number, account_name, qr_code_url, active, sort_order
            FROM payment_methods
            WHERE active = 1
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded payment methods");
        Ok(rows.into_iter().map(PaymentMethod::from).collect())
    }

    pub async fn insert(&self, method: &PaymentMethod) -> DbResult<()> {
        debug!(id = %method.id, "Inserting payment method");

        sqlx::query(
            r#"
            INSERT INTO payment_methods
                (id, name, account_number, account_name, qr_code_url, active, sort_order)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&method.id)
        .bind(&method.name)
        .bind(&method.account_number)
        .bind(&method.account_name)
        .bind(&method.qr_code_url)
        .bind(method.active)
        .bind(method.sort_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
