//! SQLite-backed preference repository: per-user string key/values.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::storage::sqlite::DbConnection;
use crate::storage::traits::PreferenceStore;

#[derive(Clone)]
pub struct PreferenceRepository {
    connection: DbConnection,
}

impl PreferenceRepository {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PreferenceStore for PreferenceRepository {
    async fn get_preference(&self, user_id: &str, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM preferences WHERE user_id = ? AND key = ?")
            .bind(user_id)
            .bind(key)
            .fetch_optional(self.connection.pool())
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set_preference(&self, user_id: &str, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO preferences (user_id, key, value) VALUES (?, ?, ?)")
            .bind(user_id)
            .bind(key)
            .bind(value)
            .execute(self.connection.pool())
            .await?;
        Ok(())
    }

    async fn delete_preference(&self, user_id: &str, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM preferences WHERE user_id = ? AND key = ?")
            .bind(user_id)
            .bind(key)
            .execute(self.connection.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_replace_delete() {
        let db = DbConnection::init_test().await.unwrap();
        let repo = PreferenceRepository::new(db);

        assert_eq!(repo.get_preference("u1", "view").await.unwrap(), None);

        repo.set_preference("u1", "view", "week").await.unwrap();
        assert_eq!(
            repo.get_preference("u1", "view").await.unwrap(),
            Some("week".to_string())
        );

        repo.set_preference("u1", "view", "month").await.unwrap();
        assert_eq!(
            repo.get_preference("u1", "view").await.unwrap(),
            Some("month".to_string())
        );

        // Keys are per-user.
        assert_eq!(repo.get_preference("u2", "view").await.unwrap(), None);

        assert!(repo.delete_preference("u1", "view").await.unwrap());
        assert!(!repo.delete_preference("u1", "view").await.unwrap());
    }
}
