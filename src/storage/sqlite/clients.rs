//! SQLite implementation for client storage

use crate::errors::StorageError;
use crate::oauth::types::Client;
use crate::storage::traits::{ClientStore, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

/// SQLite implementation of client storage
pub struct SqliteClientStore {
    pool: SqlitePool,
}

impl SqliteClientStore {
    /// Create a new SQLite client store
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/sqlite")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Convert SQLite row to Client
    fn row_to_client(row: &SqliteRow) -> Result<Client> {
        let column = |name: &str| -> Result<String> {
            row.try_get(name).map_err(|e| {
                StorageError::QueryFailed(format!("Failed to get {}: {}", name, e))
            })
        };

        let created_at = chrono::DateTime::parse_from_rfc3339(&column("created_at")?)
            .map_err(|e| StorageError::InvalidData(format!("Invalid created_at timestamp: {}", e)))?
            .with_timezone(&Utc);

        Ok(Client {
            client_id: column("client_id")?,
            client_secret: column("client_secret")?,
            name: column("name")?,
            homepage_url: column("homepage_url")?,
            description: column("description")?,
            success_redirect_url: column("success_redirect_url")?,
            created_at,
        })
    }
}

#[async_trait]
impl ClientStore for SqliteClientStore {
    async fn insert_client(&self, client: &Client) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO clients (
                client_id, client_secret, name, homepage_url, description,
                success_redirect_url, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (client_id) DO NOTHING
            "#,
        )
        .bind(&client.client_id)
        .bind(&client.client_secret)
        .bind(&client.name)
        .bind(&client.homepage_url)
        .bind(&client.description)
        .bind(&client.success_redirect_url)
        .bind(client.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(format!("Failed to insert client: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let row = sqlx::query("SELECT * FROM clients WHERE client_id = ?")
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("Failed to get client: {}", e)))?;

        row.as_ref().map(Self::row_to_client).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_store() -> SqliteClientStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let store = SqliteClientStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_and_get_client() {
        let store = create_test_store().await;
        let client = Client {
            client_id: "c1".to_string(),
            client_secret: "s1".to_string(),
            name: "Ivan".to_string(),
            homepage_url: "http://ivan.com/".to_string(),
            description: "no description".to_string(),
            success_redirect_url: "http://ivan.com/success".to_string(),
            created_at: Utc::now(),
        };

        assert!(store.insert_client(&client).await.unwrap());
        assert!(!store.insert_client(&client).await.unwrap());

        let stored = store.get_client("c1").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ivan");
        assert_eq!(stored.success_redirect_url, "http://ivan.com/success");
        assert!(store.get_client("ghost").await.unwrap().is_none());
    }
}
