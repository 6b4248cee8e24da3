//! SQLite-backed wallet and category repository.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::DateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::lookup::{Category, Wallet};
use crate::domain::models::reminder::ReminderKind;
use crate::storage::sqlite::DbConnection;
use crate::storage::traits::LookupStore;

#[derive(Clone)]
pub struct LookupRepository {
    connection: DbConnection,
}

impl LookupRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

fn row_to_wallet(row: &SqliteRow) -> Result<Wallet> {
    let created_at: String = row.try_get("created_at")?;
    Ok(Wallet {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        currency: row.try_get("currency")?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        created_at: DateTime::parse_from_rfc3339(&created_at)?,
    })
}

fn row_to_category(row: &SqliteRow) -> Result<Category> {
    let kind: String = row.try_get("kind")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(Category {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        kind: ReminderKind::from_db(&kind).map_err(|e| anyhow!(e))?,
        icon: row.try_get("icon")?,
        color: row.try_get("color")?,
        created_at: DateTime::parse_from_rfc3339(&created_at)?,
    })
}

#[async_trait]
impl LookupStore for LookupRepository {
    async fn insert_wallet(&self, wallet: &Wallet) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO wallets (id, user_id, name, currency, icon, color, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&wallet.id)
        .bind(&wallet.user_id)
        .bind(&wallet.name)
        .bind(&wallet.currency)
        .bind(wallet.icon.as_deref())
        .bind(wallet.color.as_deref())
        .bind(wallet.created_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    async fn get_wallet(&self, user_id: &str, wallet_id: &str) -> Result<Option<Wallet>> {
        let row = sqlx::query("SELECT * FROM wallets WHERE id = ? AND user_id = ?")
            .bind(wallet_id)
            .bind(user_id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(row_to_wallet).transpose()
    }

    async fn list_wallets(&self, user_id: &str) -> Result<Vec<Wallet>> {
        let rows = sqlx::query("SELECT * FROM wallets WHERE user_id = ? ORDER BY name")
            .bind(user_id)
            .fetch_all(self.connection.pool())
            .await?;
        rows.iter().map(row_to_wallet).collect()
    }

    async fn insert_category(&self, category: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, user_id, name, kind, icon, color, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category.id)
        .bind(&category.user_id)
        .bind(&category.name)
        .bind(category.kind.as_str())
        .bind(category.icon.as_deref())
        .bind(category.color.as_deref())
        .bind(category.created_at.to_rfc3339())
        .execute(self.connection.pool())
        .await?;
        Ok(())
    }

    async fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT * FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .fetch_optional(self.connection.pool())
            .await?;
        row.as_ref().map(row_to_category).transpose()
    }

    async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories WHERE user_id = ? ORDER BY name")
            .bind(user_id)
            .fetch_all(self.connection.pool())
            .await?;
        rows.iter().map(row_to_category).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dates;

    #[tokio::test]
    async fn test_wallet_round_trip_and_ordering() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = LookupRepository::new(db);

        for name in ["Ví phụ", "Ngân hàng", "Tiền mặt"] {
            repo.insert_wallet(&Wallet {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: "u1".to_string(),
                name: name.to_string(),
                currency: "VND".to_string(),
                icon: None,
                color: None,
                created_at: dates::now(),
            })
            .await
            .unwrap();
        }

        let wallets = repo.list_wallets("u1").await.unwrap();
        assert_eq!(wallets.len(), 3);
        let names: Vec<&str> = wallets.iter().map(|w| w.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_category_round_trip() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = LookupRepository::new(db);

        let category = Category {
            id: "cat-1".to_string(),
            user_id: "u1".to_string(),
            name: "Ăn uống".to_string(),
            kind: ReminderKind::Chi,
            icon: Some("🍜".to_string()),
            color: Some("#22aa66".to_string()),
            created_at: dates::now(),
        };
        repo.insert_category(&category).await.unwrap();

        let fetched = repo.get_category("u1", "cat-1").await.unwrap().unwrap();
        assert_eq!(fetched.name, category.name);
        assert_eq!(fetched.kind, ReminderKind::Chi);

        // Foreign user sees nothing.
        assert!(repo.get_category("u2", "cat-1").await.unwrap().is_none());
    }
}
