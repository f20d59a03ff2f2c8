//! Application state shared by every request handler.

use axum::response::Response;
use std::sync::Arc;

use crate::config::Config;
use crate::oauth::{
    AuthorizationHandoff, ClientDirectory, ClientRegistrationService, GrantStage,
    RedirectStatePreserver, SessionIdentityResolver,
};
use crate::storage::traits::{ClientStore, SessionStore};

/// Grant stage producing ready-made HTTP responses
pub type SharedGrantStage = Arc<dyn GrantStage<Response = Response>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Authorization handoff for `/oauth/authorize`
    pub handoff: Arc<AuthorizationHandoff<dyn GrantStage<Response = Response>>>,
    /// Client registration service for client self-registration
    pub client_registration_service: Arc<ClientRegistrationService>,
}

impl AppState {
    /// Wire the front door from its storage collaborators and grant stage
    pub fn new(
        config: Arc<Config>,
        client_store: Arc<dyn ClientStore>,
        session_store: Arc<dyn SessionStore>,
        grant_stage: SharedGrantStage,
    ) -> Self {
        let directory = Arc::new(
            ClientDirectory::new(client_store)
                .with_max_id_attempts(*config.client_id_max_attempts.as_ref()),
        );

        let mut registration = ClientRegistrationService::new(directory.clone());
        if !*config.enable_client_api.as_ref() {
            registration = registration.disable_registration();
        }

        let login_path: &str = config.login_path.as_ref();
        let login_param: &str = config.login_redirect_param.as_ref();
        let preserver = RedirectStatePreserver::new(login_path, login_param);
        let handoff = AuthorizationHandoff::new(
            directory,
            Arc::new(SessionIdentityResolver::new(session_store)),
            preserver,
            grant_stage,
        );

        Self {
            config,
            handoff: Arc::new(handoff),
            client_registration_service: Arc::new(registration),
        }
    }
}
