//! PostgreSQL implementation for client storage

use crate::errors::StorageError;
use crate::oauth::types::Client;
use crate::storage::traits::{ClientStore, Result};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

/// PostgreSQL implementation of client storage
pub struct PostgresClientStore {
    pool: PgPool,
}

impl PostgresClientStore {
    /// Create a new PostgreSQL client store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations/postgres")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Convert PostgreSQL row to Client
    fn row_to_client(row: &PgRow) -> Result<Client> {
        let column = |name: &str| -> Result<String> {
            row.try_get(name).map_err(|e| {
                StorageError::QueryFailed(format!("Failed to get {}: {}", name, e))
            })
        };

        let created_at: chrono::DateTime<chrono::Utc> = row
            .try_get("created_at")
            .map_err(|e| StorageError::QueryFailed(format!("Failed to get created_at: {}", e)))?;

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
impl ClientStore for PostgresClientStore {
    async fn insert_client(&self, client: &Client) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO clients (
                client_id, client_secret, name, homepage_url, description,
                success_redirect_url, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (client_id) DO NOTHING
            "#,
        )
        .bind(&client.client_id)
        .bind(&client.client_secret)
        .bind(&client.name)
        .bind(&client.homepage_url)
        .bind(&client.description)
        .bind(&client.success_redirect_url)
        .bind(client.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(format!("Failed to insert client: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let row = sqlx::query("SELECT * FROM clients WHERE client_id = $1")
            .bind(client_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("Failed to get client: {}", e)))?;

        row.as_ref().map(Self::row_to_client).transpose()
    }
}
