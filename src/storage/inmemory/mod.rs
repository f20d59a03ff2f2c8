//! In-memory storage implementations
//!
//! These implementations are suitable for development, single-node
//! deployments and testing.

mod clients;
mod sessions;

pub use clients::MemoryClientStore;
pub use sessions::MemorySessionStore;
