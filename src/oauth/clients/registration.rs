//! Client self-registration.
//!
//! Validates the caller-supplied application details and mints a new
//! client_id/client_secret pair through the [`ClientDirectory`].

use std::sync::Arc;

use crate::errors::ClientRegistrationError;
use crate::oauth::clients::directory::ClientDirectory;
use crate::oauth::types::{RegistrationRequest, RegistrationResponse};

/// Client Registration Service
pub struct ClientRegistrationService {
    directory: Arc<ClientDirectory>,
    /// Whether client registration is enabled
    registration_enabled: bool,
}

impl ClientRegistrationService {
    /// Create a new client registration service
    pub fn new(directory: Arc<ClientDirectory>) -> Self {
        Self {
            directory,
            registration_enabled: true,
        }
    }

    /// Disable client registration
    pub fn disable_registration(mut self) -> Self {
        self.registration_enabled = false;
        self
    }

    /// Register a new client.
    ///
    /// Not idempotent: resubmitting identical input creates another client.
    pub async fn register_client(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationResponse, ClientRegistrationError> {
        if !self.registration_enabled {
            return Err(ClientRegistrationError::RegistrationDisabled);
        }

        let missing = request.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "rejecting client registration");
            return Err(ClientRegistrationError::MissingFields(missing));
        }

        let client = self.directory.register(&request).await?;
        tracing::info!(client_id = %client.client_id, name = %client.name, "registered client");

        Ok(RegistrationResponse::from(&client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::inmemory::MemoryClientStore;

    fn create_service() -> (ClientRegistrationService, Arc<ClientDirectory>) {
        let directory = Arc::new(ClientDirectory::new(Arc::new(MemoryClientStore::new())));
        (ClientRegistrationService::new(directory.clone()), directory)
    }

    #[tokio::test]
    async fn test_client_registration() {
        let (service, directory) = create_service();

        let response = service
            .register_client(RegistrationRequest::new(
                "Ivan",
                "http://ivan.com/",
                "no description",
                "http://ivan.com/success",
            ))
            .await
            .unwrap();

        assert!(!response.client_id.is_empty());
        assert!(!response.client_secret.is_empty());

        let client = directory
            .find_by_id(&response.client_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(client.client_secret, response.client_secret);
        assert_eq!(client.name, "Ivan");
        assert_eq!(client.homepage_url, "http://ivan.com/");
        assert_eq!(client.description, "no description");
        assert_eq!(client.success_redirect_url, "http://ivan.com/success");
    }

    #[tokio::test]
    async fn test_missing_fields_are_named() {
        let (service, _) = create_service();

        let result = service
            .register_client(RegistrationRequest {
                name: Some("Ivan".to_string()),
                homepage_url: None,
                description: Some("".to_string()),
                success_redirect_url: Some("http://ivan.com/success".to_string()),
            })
            .await;

        let Err(error) = result else {
            panic!("registration with missing fields must fail");
        };
        assert!(matches!(
            &error,
            ClientRegistrationError::MissingFields(fields) if fields == &vec!["homepage_url", "description"]
        ));
        assert!(error.to_string().contains("homepage_url, description"));
    }

    #[tokio::test]
    async fn test_disabled_registration() {
        let (service, _) = create_service();
        let service = service.disable_registration();

        let result = service
            .register_client(RegistrationRequest::new("a", "b", "c", "d"))
            .await;
        assert!(matches!(
            result,
            Err(ClientRegistrationError::RegistrationDisabled)
        ));
    }
}
