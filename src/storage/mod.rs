//! Trait-based storage abstractions with in-memory, SQLite, and PostgreSQL backends.

pub mod inmemory;
pub mod traits;

// Feature-gated storage implementations
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-export commonly used types and traits
pub use inmemory::{MemoryClientStore, MemorySessionStore};
pub use traits::*;

#[cfg(feature = "postgres")]
pub use postgres::{PostgresClientStore, PostgresSessionStore};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteClientStore, SqliteSessionStore};

use crate::errors::StorageError;
use std::sync::Arc;

/// Storage backend configuration and factory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    #[cfg(feature = "sqlite")]
    Sqlite(String), // Connection string/path
    #[cfg(feature = "postgres")]
    Postgres(String), // Connection string
}

/// Client and session stores sharing one backend
pub type StoragePair = (Arc<dyn ClientStore>, Arc<dyn SessionStore>);

/// Create the stores for the configured backend, running migrations for SQL backends
pub async fn create_storage(backend: StorageBackend) -> std::result::Result<StoragePair, StorageError> {
    match backend {
        StorageBackend::Memory => Ok((
            Arc::new(MemoryClientStore::new()),
            Arc::new(MemorySessionStore::new()),
        )),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite(database_url) => {
            let pool = sqlx::SqlitePool::connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionFailed(format!("SQLite connection failed: {}", e))
                })?;

            let clients = SqliteClientStore::new(pool.clone());
            clients.migrate().await?;

            Ok((Arc::new(clients), Arc::new(SqliteSessionStore::new(pool))))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres(database_url) => {
            let pool = sqlx::postgres::PgPool::connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionFailed(format!("PostgreSQL connection failed: {}", e))
                })?;

            let clients = PostgresClientStore::new(pool.clone());
            clients.migrate().await?;

            Ok((Arc::new(clients), Arc::new(PostgresSessionStore::new(pool))))
        }
    }
}

/// Parse storage backend from configuration string
pub fn parse_storage_backend(
    backend_name: &str,
    database_url: Option<&str>,
) -> std::result::Result<StorageBackend, StorageError> {
    match backend_name {
        "memory" => Ok(StorageBackend::Memory),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let url = database_url.unwrap_or("sqlite:authgate.db?mode=rwc");
            Ok(StorageBackend::Sqlite(url.to_string()))
        }
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = database_url.ok_or_else(|| {
                StorageError::InvalidData("DATABASE_URL required for postgres backend".to_string())
            })?;
            Ok(StorageBackend::Postgres(url.to_string()))
        }
        _ => {
            let _ = database_url;
            Err(StorageError::InvalidData(format!(
                "Unknown storage backend: {}",
                backend_name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_backend() {
        assert_eq!(
            parse_storage_backend("memory", None).unwrap(),
            StorageBackend::Memory
        );
        assert!(parse_storage_backend("cassandra", None).is_err());
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_postgres_requires_database_url() {
        assert!(parse_storage_backend("postgres", None).is_err());
        assert_eq!(
            parse_storage_backend("postgres", Some("postgres://localhost/authgate")).unwrap(),
            StorageBackend::Postgres("postgres://localhost/authgate".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_memory_storage() {
        let (clients, sessions) = create_storage(StorageBackend::Memory).await.unwrap();
        assert!(clients.get_client("ghost").await.unwrap().is_none());
        assert!(sessions.get_session_identity("s-1").await.unwrap().is_none());
    }
}
