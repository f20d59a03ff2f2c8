//! Response helpers shared by the OAuth handlers.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::oauth::OAuthErrorResponse;

/// Standardized `{error, error_description?}` JSON error
pub(crate) fn oauth_error(status: StatusCode, body: OAuthErrorResponse) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(body),
    )
        .into_response()
}

/// `302 Found` pointing at `location`
pub(crate) fn found(location: &str) -> Result<Response, header::InvalidHeaderValue> {
    let location = HeaderValue::from_str(location)?;
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
