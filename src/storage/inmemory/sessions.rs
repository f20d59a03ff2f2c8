//! In-memory login session storage implementation
//!
//! Sessions are written by the login step, which lives outside this crate;
//! the front door only reads them.

use crate::errors::StorageError;
use crate::oauth::types::Identity;
use crate::storage::traits::{Result, SessionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory session store mapping session ids to identities
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Identity>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `identity` to `session_id`, replacing any previous binding
    pub fn insert_session(&self, session_id: impl Into<String>, identity: Identity) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| StorageError::LockPoisoned(format!("Lock error: {}", e)))?;
        sessions.insert(session_id.into(), identity);
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_session_identity(&self, session_id: &str) -> Result<Option<Identity>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|e| StorageError::LockPoisoned(format!("Lock error: {}", e)))?;
        Ok(sessions.get(session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_lookup() {
        let store = MemorySessionStore::new();
        store.insert_session("s-1", Identity::new("alice")).unwrap();
        store.insert_session("s-1", Identity::new("bob")).unwrap();

        assert_eq!(
            store.get_session_identity("s-1").await.unwrap(),
            Some(Identity::new("bob"))
        );
        assert_eq!(store.get_session_identity("s-2").await.unwrap(), None);
    }
}
