//! OAuth front door: client directory, identity resolution, continuation tokens
//! and the authorization handoff state machine.

pub mod clients;
pub mod continuation;
pub mod grant_stage;
pub mod handoff;
pub mod identity;
pub mod request;
pub mod types;

// Re-export frequently used items from each module
pub use clients::{ClientDirectory, ClientRegistrationService, CredentialGenerator, RandomCredentials};
pub use continuation::{ContinuationTarget, ContinuationToken, RedirectStatePreserver};
pub use grant_stage::GrantStage;
pub use handoff::{AuthorizationHandoff, HandoffOutcome};
pub use identity::{IdentityResolver, SessionIdentityResolver};
pub use request::{AuthorizationRequestContext, SessionContext};
pub use types::{
    Client, Identity, OAuthErrorCode, OAuthErrorResponse, RegistrationRequest,
    RegistrationResponse,
};
