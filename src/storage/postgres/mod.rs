//! PostgreSQL storage implementations
//!
//! PostgreSQL is suitable for production deployments where several nodes
//! share one client directory.

mod clients;
mod sessions;

pub use clients::PostgresClientStore;
pub use sessions::PostgresSessionStore;
