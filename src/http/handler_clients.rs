//! Handles POST /oauth/clients/register - client self-registration

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use super::{context::AppState, utils_oauth::oauth_error};
use crate::{
    errors::ClientRegistrationError,
    oauth::{OAuthErrorCode, OAuthErrorResponse, RegistrationRequest},
};

pub async fn handle_register_client(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return oauth_error(
                StatusCode::BAD_REQUEST,
                OAuthErrorResponse::invalid_request(rejection.body_text()),
            );
        }
    };

    match state
        .client_registration_service
        .register_client(request)
        .await
    {
        Ok(response) => (
            StatusCode::CREATED,
            [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
            Json(response),
        )
            .into_response(),
        Err(e @ ClientRegistrationError::MissingFields(_)) => oauth_error(
            StatusCode::BAD_REQUEST,
            OAuthErrorResponse::invalid_request(e.to_string()),
        ),
        Err(e @ ClientRegistrationError::RegistrationDisabled) => oauth_error(
            StatusCode::FORBIDDEN,
            OAuthErrorResponse::new(OAuthErrorCode::RegistrationNotSupported, Some(e.to_string())),
        ),
        Err(e) => {
            tracing::error!(error = ?e, "client registration failed");
            oauth_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                OAuthErrorResponse::server_error(),
            )
        }
    }
}
