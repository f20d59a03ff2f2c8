//! Handles GET /oauth/authorize - hands the request to the login detour or the grant stage

use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::{
    context::AppState,
    utils_oauth::{found, oauth_error},
};
use crate::oauth::{AuthorizationRequestContext, HandoffOutcome, OAuthErrorResponse, SessionContext};

pub async fn handle_oauth_authorize(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    jar: CookieJar,
) -> Response {
    let session_id = jar
        .get(state.config.session_cookie_name.as_ref())
        .map(|cookie| cookie.value().to_string());
    let request = match AuthorizationRequestContext::from_query(
        uri.path(),
        uri.query(),
        SessionContext::new(session_id),
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = ?e, "rejecting undecodable authorization request");
            return oauth_error(
                StatusCode::BAD_REQUEST,
                OAuthErrorResponse::invalid_request(e.to_string()),
            );
        }
    };

    match state.handoff.ack(&request).await {
        Ok(HandoffOutcome::InvalidRequest(description)) => oauth_error(
            StatusCode::BAD_REQUEST,
            OAuthErrorResponse::invalid_request(description),
        ),
        Ok(HandoffOutcome::UnauthorizedClient) => oauth_error(
            StatusCode::BAD_REQUEST,
            OAuthErrorResponse::unauthorized_client(),
        ),
        Ok(HandoffOutcome::LoginRedirect { location }) => match found(&location) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = ?e, "login redirect is not a valid header value");
                server_error()
            }
        },
        Ok(HandoffOutcome::Delegated(response)) => response.into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "authorization handoff failed");
            server_error()
        }
    }
}

fn server_error() -> Response {
    oauth_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        OAuthErrorResponse::server_error(),
    )
}
