//! SQLite implementation for login session lookups

use crate::errors::StorageError;
use crate::oauth::types::Identity;
use crate::storage::traits::{Result, SessionStore};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

/// Reads sessions from the `login_sessions` table maintained by the login step
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn get_session_identity(&self, session_id: &str) -> Result<Option<Identity>> {
        let subject: Option<String> =
            sqlx::query_scalar("SELECT subject FROM login_sessions WHERE session_id = ?")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::QueryFailed(format!("Failed to get session: {}", e)))?;

        Ok(subject.map(Identity::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::SqliteClientStore;

    #[tokio::test]
    async fn test_session_lookup() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        SqliteClientStore::new(pool.clone()).migrate().await.unwrap();

        sqlx::query("INSERT INTO login_sessions (session_id, subject, created_at) VALUES (?, ?, ?)")
            .bind("s-1")
            .bind("alice")
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&pool)
            .await
            .unwrap();

        let store = SqliteSessionStore::new(pool);
        assert_eq!(
            store.get_session_identity("s-1").await.unwrap(),
            Some(Identity::new("alice"))
        );
        assert_eq!(store.get_session_identity("s-2").await.unwrap(), None);
    }
}
