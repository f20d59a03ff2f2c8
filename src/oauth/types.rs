//! Core OAuth front-door types: registered clients, registration payloads,
//! resource-owner identities and the standardized error payload.

use base64::prelude::*;
use chrono::{DateTime, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

/// Number of random bytes behind every generated credential (256 bits).
pub const CREDENTIAL_BYTES: usize = 32;

/// Registered client application.
///
/// Created only through client registration and never mutated afterwards.
/// `client_id` and `client_secret` are always server-generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique client identifier
    pub client_id: String,
    /// Client secret
    pub client_secret: String,
    /// Human-readable application name
    pub name: String,
    /// Application homepage
    pub homepage_url: String,
    /// Free-form description
    pub description: String,
    /// Where the application expects to land after a successful authorization
    pub success_redirect_url: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied client registration input.
///
/// Every field is optional on the wire so that missing fields can be reported
/// by name instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "homepageUrl")]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "successRedirectUrl")]
    pub success_redirect_url: Option<String>,
}

impl RegistrationRequest {
    /// Build a request with all four fields present
    pub fn new(
        name: impl Into<String>,
        homepage_url: impl Into<String>,
        description: impl Into<String>,
        success_redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            homepage_url: Some(homepage_url.into()),
            description: Some(description.into()),
            success_redirect_url: Some(success_redirect_url.into()),
        }
    }

    /// Names of the fields that are missing or blank, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("homepage_url", &self.homepage_url),
            ("description", &self.description),
            ("success_redirect_url", &self.success_redirect_url),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect()
    }
}

/// Credentials returned to the registrant. The secret is only ever exposed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub client_id: String,
    pub client_secret: String,
}

impl From<&Client> for RegistrationResponse {
    fn from(client: &Client) -> Self {
        Self {
            client_id: client.client_id.clone(),
            client_secret: client.client_secret.clone(),
        }
    }
}

/// Authenticated resource owner. Opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Standardized OAuth error codes emitted by the front door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthErrorCode {
    InvalidRequest,
    UnauthorizedClient,
    ServerError,
    RegistrationNotSupported,
}

/// OAuth Error Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
    /// Error code
    pub error: OAuthErrorCode,
    /// Error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

impl OAuthErrorResponse {
    pub fn new(error: OAuthErrorCode, error_description: Option<String>) -> Self {
        Self {
            error,
            error_description,
        }
    }

    pub fn invalid_request(description: impl Into<String>) -> Self {
        Self::new(OAuthErrorCode::InvalidRequest, Some(description.into()))
    }

    pub fn unauthorized_client() -> Self {
        Self::new(OAuthErrorCode::UnauthorizedClient, None)
    }

    pub fn server_error() -> Self {
        Self::new(OAuthErrorCode::ServerError, None)
    }
}

/// Generate a URL-safe token from the operating system CSPRNG
pub fn generate_token() -> String {
    let mut bytes = [0u8; CREDENTIAL_BYTES];
    OsRng.fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}
