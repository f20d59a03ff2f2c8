//! Grant stage that forwards authenticated requests to the issuance endpoint.

use async_trait::async_trait;
use axum::response::Response;
use url::form_urlencoded;

use super::utils_oauth::found;
use crate::errors::HandoffError;
use crate::oauth::{AuthorizationRequestContext, Client, GrantStage, Identity};

/// Redirects to the configured grant-issuance path with the original parameters.
///
/// The identity is not put on the wire; the issuance endpoint resolves the
/// session again on its side.
pub struct ForwardingGrantStage {
    grant_path: String,
}

impl ForwardingGrantStage {
    pub fn new(grant_path: impl Into<String>) -> Self {
        Self {
            grant_path: grant_path.into(),
        }
    }

    fn location(&self, request: &AuthorizationRequestContext) -> String {
        if request.params().is_empty() {
            return self.grant_path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                request
                    .params()
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
            .finish();
        let separator = if self.grant_path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.grant_path, separator, query)
    }
}

#[async_trait]
impl GrantStage for ForwardingGrantStage {
    type Response = Response;

    async fn execute(
        &self,
        client: &Client,
        identity: &Identity,
        request: &AuthorizationRequestContext,
    ) -> Result<Self::Response, HandoffError> {
        let subject: &str = identity.as_ref();
        tracing::info!(
            client_id = %client.client_id,
            subject,
            "forwarding authorization request to grant stage"
        );
        found(&self.location(request)).map_err(|e| HandoffError::Downstream(e.to_string()))
    }
}
