//! In-memory client storage implementation

use crate::errors::StorageError;
use crate::oauth::types::Client;
use crate::storage::traits::{ClientStore, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

/// In-memory client store
#[derive(Default)]
pub struct MemoryClientStore {
    clients: Mutex<HashMap<String, Client>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn insert_client(&self, client: &Client) -> Result<bool> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|e| StorageError::LockPoisoned(format!("Lock error: {}", e)))?;
        match clients.entry(client.client_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(client.clone());
                Ok(true)
            }
        }
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let clients = self
            .clients
            .lock()
            .map_err(|e| StorageError::LockPoisoned(format!("Lock error: {}", e)))?;
        Ok(clients.get(client_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn client(client_id: &str, name: &str) -> Client {
        Client {
            client_id: client_id.to_string(),
            client_secret: "secret".to_string(),
            name: name.to_string(),
            homepage_url: "https://example.com/".to_string(),
            description: "test".to_string(),
            success_redirect_url: "https://example.com/success".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_if_absent() {
        let store = MemoryClientStore::new();

        assert!(store.insert_client(&client("c1", "first")).await.unwrap());
        assert!(!store.insert_client(&client("c1", "second")).await.unwrap());

        // The original record is never overwritten
        let stored = store.get_client("c1").await.unwrap().unwrap();
        assert_eq!(stored.name, "first");
        assert!(store.get_client("c2").await.unwrap().is_none());
    }
}
