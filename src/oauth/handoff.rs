//! Authorization handoff: decides between rejecting the request, sending the
//! caller to log in, and delegating to the grant stage.
//!
//! ```text
//! START -> CLIENT_LOOKUP -> UNAUTHORIZED_CLIENT
//!                        -> IDENTITY_LOOKUP -> LOGIN_REDIRECT
//!                                           -> DELEGATED
//! ```
//!
//! Each transition depends only on the request and a single collaborator read.
//! Collaborator failures abort the handoff; they are never read as "not found".

use std::sync::Arc;

use crate::errors::HandoffError;
use crate::oauth::clients::directory::ClientDirectory;
use crate::oauth::continuation::RedirectStatePreserver;
use crate::oauth::grant_stage::GrantStage;
use crate::oauth::identity::IdentityResolver;
use crate::oauth::request::AuthorizationRequestContext;

/// Terminal result of a handoff that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffOutcome<R> {
    /// A required parameter is missing; the description names it.
    InvalidRequest(String),
    /// The client_id is not registered. Never accompanied by a redirect.
    UnauthorizedClient,
    /// No authenticated caller; send them to the login endpoint.
    LoginRedirect { location: String },
    /// The grant stage handled the request; its response is returned as is.
    Delegated(R),
}

/// Orchestrates client lookup, identity lookup and the login detour.
pub struct AuthorizationHandoff<G: GrantStage + ?Sized> {
    directory: Arc<ClientDirectory>,
    identities: Arc<dyn IdentityResolver>,
    preserver: RedirectStatePreserver,
    grant_stage: Arc<G>,
}

impl<G: GrantStage + ?Sized> AuthorizationHandoff<G> {
    pub fn new(
        directory: Arc<ClientDirectory>,
        identities: Arc<dyn IdentityResolver>,
        preserver: RedirectStatePreserver,
        grant_stage: Arc<G>,
    ) -> Self {
        Self {
            directory,
            identities,
            preserver,
            grant_stage,
        }
    }

    pub fn preserver(&self) -> &RedirectStatePreserver {
        &self.preserver
    }

    /// Run one authorization request through the handoff.
    pub async fn ack(
        &self,
        request: &AuthorizationRequestContext,
    ) -> Result<HandoffOutcome<G::Response>, HandoffError> {
        if request.occurrences("client_id") > 1 {
            tracing::debug!(path = request.path(), "authorization request with repeated client_id");
            return Ok(HandoffOutcome::InvalidRequest(
                "Parameter must not be repeated: client_id".to_string(),
            ));
        }

        let Some(client_id) = request.client_id() else {
            tracing::debug!(path = request.path(), "authorization request without client_id");
            return Ok(HandoffOutcome::InvalidRequest(
                "Missing required parameter: client_id".to_string(),
            ));
        };

        let client = match self.directory.find_by_id(client_id).await {
            Ok(Some(client)) => client,
            Ok(None) => {
                tracing::warn!(client_id, "authorization request from unregistered client");
                return Ok(HandoffOutcome::UnauthorizedClient);
            }
            Err(e) => {
                tracing::error!(error = ?e, client_id, "client lookup failed");
                return Err(e.into());
            }
        };

        let identity = match self.identities.find(request).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!(error = ?e, client_id, "identity lookup failed");
                return Err(e.into());
            }
        };

        let Some(identity) = identity else {
            let token = self
                .preserver
                .encode(request.path(), request.params())
                .inspect_err(|e| {
                    tracing::error!(error = ?e, client_id, "unable to preserve authorization request");
                })?;
            tracing::debug!(client_id, "no authenticated caller, redirecting to login");
            return Ok(HandoffOutcome::LoginRedirect {
                location: self.preserver.login_location(&token),
            });
        };

        tracing::debug!(client_id, "delegating to grant stage");
        let response = self
            .grant_stage
            .execute(&client, &identity, request)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, client_id, "grant stage failed"))?;

        Ok(HandoffOutcome::Delegated(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{IdentityError, StorageError};
    use crate::oauth::request::SessionContext;
    use crate::oauth::types::{Client, Identity, RegistrationRequest};
    use crate::storage::inmemory::MemoryClientStore;
    use crate::storage::traits::ClientStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Delegation = (Client, Identity, AuthorizationRequestContext);

    /// Records every delegation and answers with a fixed marker
    #[derive(Default)]
    struct RecordingStage {
        calls: Mutex<Vec<Delegation>>,
    }

    #[async_trait]
    impl GrantStage for RecordingStage {
        type Response = &'static str;

        async fn execute(
            &self,
            client: &Client,
            identity: &Identity,
            request: &AuthorizationRequestContext,
        ) -> Result<Self::Response, HandoffError> {
            self.calls
                .lock()
                .unwrap()
                .push((client.clone(), identity.clone(), request.clone()));
            Ok("downstream-response")
        }
    }

    struct FixedIdentity(Option<Identity>);

    #[async_trait]
    impl IdentityResolver for FixedIdentity {
        async fn find(
            &self,
            _request: &AuthorizationRequestContext,
        ) -> Result<Option<Identity>, IdentityError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenIdentity;

    #[async_trait]
    impl IdentityResolver for BrokenIdentity {
        async fn find(
            &self,
            _request: &AuthorizationRequestContext,
        ) -> Result<Option<Identity>, IdentityError> {
            Err(IdentityError::SessionLookupFailed("backend down".to_string()))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl ClientStore for BrokenStore {
        async fn insert_client(&self, _client: &Client) -> crate::storage::traits::Result<bool> {
            Err(StorageError::ConnectionFailed("down".to_string()))
        }

        async fn get_client(
            &self,
            _client_id: &str,
        ) -> crate::storage::traits::Result<Option<Client>> {
            Err(StorageError::ConnectionFailed("down".to_string()))
        }
    }

    async fn registered_directory() -> (Arc<ClientDirectory>, Client) {
        let directory = Arc::new(ClientDirectory::new(Arc::new(MemoryClientStore::new())));
        let client = directory
            .register(&RegistrationRequest::new(
                "App",
                "https://app.example/",
                "test",
                "https://app.example/done",
            ))
            .await
            .unwrap();
        (directory, client)
    }

    fn handoff(
        directory: Arc<ClientDirectory>,
        identities: Arc<dyn IdentityResolver>,
        stage: Arc<RecordingStage>,
    ) -> AuthorizationHandoff<RecordingStage> {
        AuthorizationHandoff::new(
            directory,
            identities,
            RedirectStatePreserver::default(),
            stage,
        )
    }

    fn request(query: &str) -> AuthorizationRequestContext {
        AuthorizationRequestContext::from_query(
            "/oauth/authorize",
            Some(query),
            SessionContext::anonymous(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_client_id() {
        let (directory, _) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let handoff = handoff(directory, Arc::new(FixedIdentity(None)), stage);

        let outcome = handoff.ack(&request("response_type=code")).await.unwrap();
        assert!(matches!(outcome, HandoffOutcome::InvalidRequest(d) if d.contains("client_id")));
    }

    #[tokio::test]
    async fn test_repeated_client_id_is_rejected() {
        let (directory, client) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let identity = Arc::new(FixedIdentity(Some(Identity::new("alice"))));
        let handoff = handoff(directory, identity, stage.clone());

        let outcome = handoff
            .ack(&request(&format!(
                "client_id={}&client_id=ghost",
                client.client_id
            )))
            .await
            .unwrap();
        assert!(matches!(outcome, HandoffOutcome::InvalidRequest(d) if d.contains("client_id")));
        assert!(stage.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_client_never_redirects() {
        let (directory, _) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let identity = Arc::new(FixedIdentity(Some(Identity::new("alice"))));
        let handoff = handoff(directory, identity, stage.clone());

        let outcome = handoff.ack(&request("client_id=ghost")).await.unwrap();
        assert_eq!(outcome, HandoffOutcome::UnauthorizedClient);
        assert!(stage.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_redirect_preserves_request() {
        let (directory, client) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let handoff = handoff(directory, Arc::new(FixedIdentity(None)), stage.clone());

        let ctx = request(&format!(
            "response_type=code&client_id={}&state=x%26y",
            client.client_id
        ));
        let HandoffOutcome::LoginRedirect { location } = handoff.ack(&ctx).await.unwrap() else {
            panic!("expected login redirect");
        };

        let token = location
            .strip_prefix("/r/oauth/login?redirectUrl=")
            .expect("login location");
        let target = handoff.preserver().decode(token).unwrap();
        assert_eq!(target.path, "/oauth/authorize");
        assert_eq!(target.params, ctx.params().to_vec());
        assert!(stage.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delegates_exact_tuple() {
        let (directory, client) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let identity = Identity::new("alice");
        let handoff = handoff(
            directory,
            Arc::new(FixedIdentity(Some(identity.clone()))),
            stage.clone(),
        );

        let ctx = request(&format!("client_id={}&scope=read", client.client_id));
        let outcome = handoff.ack(&ctx).await.unwrap();
        assert_eq!(outcome, HandoffOutcome::Delegated("downstream-response"));

        let calls = stage.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (client, identity, ctx));
    }

    #[tokio::test]
    async fn test_directory_failure_is_fatal() {
        let directory = Arc::new(ClientDirectory::new(Arc::new(BrokenStore)));
        let stage = Arc::new(RecordingStage::default());
        let handoff = handoff(directory, Arc::new(FixedIdentity(None)), stage);

        let result = handoff.ack(&request("client_id=c1")).await;
        assert!(matches!(result, Err(HandoffError::Directory(_))));
    }

    #[tokio::test]
    async fn test_identity_failure_is_fatal() {
        let (directory, client) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let handoff = handoff(directory, Arc::new(BrokenIdentity), stage);

        let result = handoff
            .ack(&request(&format!("client_id={}", client.client_id)))
            .await;
        assert!(matches!(result, Err(HandoffError::Identity(_))));
    }

    #[tokio::test]
    async fn test_unrepresentable_path_is_fatal() {
        let (directory, client) = registered_directory().await;
        let stage = Arc::new(RecordingStage::default());
        let handoff = handoff(directory, Arc::new(FixedIdentity(None)), stage);

        let ctx = AuthorizationRequestContext::from_query(
            "//evil.example/authorize",
            Some(&format!("client_id={}", client.client_id)),
            SessionContext::anonymous(),
        )
        .unwrap();
        let result = handoff.ack(&ctx).await;
        assert!(matches!(result, Err(HandoffError::Encoding(_))));
    }
}
