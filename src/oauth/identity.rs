//! Resource-owner identity resolution for authorization requests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::IdentityError;
use crate::oauth::request::AuthorizationRequestContext;
use crate::oauth::types::Identity;
use crate::storage::traits::SessionStore;

/// Resolves the authenticated caller of a request.
///
/// Lookups are read-only: resolving an identity never creates, refreshes or
/// invalidates session state. `Ok(None)` means there is no authenticated caller.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn find(
        &self,
        request: &AuthorizationRequestContext,
    ) -> Result<Option<Identity>, IdentityError>;
}

/// Identity resolver backed by a [`SessionStore`] keyed by the request's session id.
#[derive(Clone)]
pub struct SessionIdentityResolver {
    sessions: Arc<dyn SessionStore>,
}

impl SessionIdentityResolver {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl IdentityResolver for SessionIdentityResolver {
    async fn find(
        &self,
        request: &AuthorizationRequestContext,
    ) -> Result<Option<Identity>, IdentityError> {
        let Some(session_id) = request.session().session_id() else {
            return Ok(None);
        };

        self.sessions
            .get_session_identity(session_id)
            .await
            .map_err(|e| IdentityError::SessionLookupFailed(e.to_string()))
    }
}
