//! PostgreSQL implementation for login session lookups

use crate::errors::StorageError;
use crate::oauth::types::Identity;
use crate::storage::traits::{Result, SessionStore};
use async_trait::async_trait;
use sqlx::postgres::PgPool;

/// Reads sessions from the `login_sessions` table maintained by the login step
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get_session_identity(&self, session_id: &str) -> Result<Option<Identity>> {
        let subject: Option<String> =
            sqlx::query_scalar("SELECT subject FROM login_sessions WHERE session_id = $1")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::QueryFailed(format!("Failed to get session: {}", e)))?;

        Ok(subject.map(Identity::new))
    }
}
