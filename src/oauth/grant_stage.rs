//! Seam to the downstream grant-issuance stage.

use async_trait::async_trait;

use crate::errors::HandoffError;
use crate::oauth::request::AuthorizationRequestContext;
use crate::oauth::types::{Client, Identity};

/// Receives authorization requests whose client and resource owner are both known.
///
/// Whatever the stage returns is handed back to the transport untouched.
#[async_trait]
pub trait GrantStage: Send + Sync {
    type Response: Send;

    async fn execute(
        &self,
        client: &Client,
        identity: &Identity,
        request: &AuthorizationRequestContext,
    ) -> Result<Self::Response, HandoffError>;
}
