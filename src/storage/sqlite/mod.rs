//! SQLite storage implementations
//!
//! SQLite is suitable for single-instance deployments and development.

mod clients;
mod sessions;

pub use clients::SqliteClientStore;
pub use sessions::SqliteSessionStore;
