//! Main router configuration assembling the authorization front door endpoints.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    context::AppState, handler_authorize::handle_oauth_authorize,
    handler_clients::handle_register_client, handler_health::handle_health,
};

/// Build the application router
pub fn build_router(ctx: AppState) -> Router {
    // Registration stays routed when disabled so callers get registration_not_supported
    let oauth_routes = Router::new()
        .route("/authorize", get(handle_oauth_authorize))
        .route("/clients/register", post(handle_register_client));

    Router::new()
        .route("/health", get(handle_health))
        .nest("/oauth", oauth_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
