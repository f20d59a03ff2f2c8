//! Lookup and registration of client applications.

use chrono::Utc;
use std::sync::Arc;

use crate::errors::{ClientRegistrationError, StorageError};
use crate::oauth::types::{Client, RegistrationRequest, generate_token};
use crate::storage::traits::ClientStore;

/// Default number of identifiers tried before registration gives up
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 5;

/// Source of freshly minted client credentials
pub trait CredentialGenerator: Send + Sync {
    fn client_id(&self) -> String;
    fn client_secret(&self) -> String;
}

/// Independent 256-bit URL-safe tokens drawn from the OS CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomCredentials;

impl CredentialGenerator for RandomCredentials {
    fn client_id(&self) -> String {
        generate_token()
    }

    fn client_secret(&self) -> String {
        generate_token()
    }
}

/// Directory of registered clients on top of a [`ClientStore`].
#[derive(Clone)]
pub struct ClientDirectory {
    store: Arc<dyn ClientStore>,
    credentials: Arc<dyn CredentialGenerator>,
    max_id_attempts: u32,
}

impl ClientDirectory {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self {
            store,
            credentials: Arc::new(RandomCredentials),
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }

    /// Replace the credential source
    pub fn with_credential_generator(mut self, credentials: Arc<dyn CredentialGenerator>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Bound the number of client_id collisions tolerated per registration
    pub fn with_max_id_attempts(mut self, max_id_attempts: u32) -> Self {
        self.max_id_attempts = max_id_attempts.max(1);
        self
    }

    /// Look up a client. An unknown id is `Ok(None)`.
    pub async fn find_by_id(&self, client_id: &str) -> Result<Option<Client>, StorageError> {
        self.store.get_client(client_id).await
    }

    /// Create a client with server-generated credentials.
    ///
    /// Every call creates a new client, even for input identical to an
    /// earlier registration.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<Client, ClientRegistrationError> {
        let (name, homepage_url, description, success_redirect_url) = match (
            request.name.as_deref(),
            request.homepage_url.as_deref(),
            request.description.as_deref(),
            request.success_redirect_url.as_deref(),
        ) {
            (Some(name), Some(homepage_url), Some(description), Some(success_redirect_url))
                if request.missing_fields().is_empty() =>
            {
                (name, homepage_url, description, success_redirect_url)
            }
            _ => {
                return Err(ClientRegistrationError::MissingFields(
                    request.missing_fields(),
                ));
            }
        };

        for attempt in 1..=self.max_id_attempts {
            let client = Client {
                client_id: self.credentials.client_id(),
                client_secret: self.credentials.client_secret(),
                name: name.to_string(),
                homepage_url: homepage_url.to_string(),
                description: description.to_string(),
                success_redirect_url: success_redirect_url.to_string(),
                created_at: Utc::now(),
            };

            if self.store.insert_client(&client).await? {
                return Ok(client);
            }

            tracing::warn!(attempt, "generated client_id already taken, retrying");
        }

        Err(ClientRegistrationError::IdentifierExhausted(
            self.max_id_attempts,
        ))
    }
}
