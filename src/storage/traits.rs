//! Storage trait definitions for client records and login sessions.
//!
//! Implementations must be safe to call concurrently from independent
//! request-handling tasks.

use crate::errors::StorageError;
use crate::oauth::types::{Client, Identity};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Trait for storing and retrieving registered clients
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Insert `client` only if its `client_id` is not taken yet.
    ///
    /// Returns `false` when another client already owns the identifier. The
    /// check and the insert must be a single atomic operation.
    async fn insert_client(&self, client: &Client) -> Result<bool>;

    /// Retrieve a client by ID
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>>;
}

/// Trait for reading authenticated login sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve the identity bound to `session_id`, if the session exists
    async fn get_session_identity(&self, session_id: &str) -> Result<Option<Identity>>;
}
