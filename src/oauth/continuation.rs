//! Continuation tokens carrying an authorization request across the login detour.
//!
//! A request is preserved as a relative target (`path` or `path?query`) where the
//! query is rebuilt from the ordered parameter list with
//! `application/x-www-form-urlencoded` serialization. The target is then
//! percent-encoded as a whole so it can travel as a single query value.

use url::form_urlencoded;

use crate::errors::ContinuationError;
use crate::oauth::request::parse_query;

/// Default login endpoint the caller is sent to when no session exists
pub const DEFAULT_LOGIN_PATH: &str = "/r/oauth/login";

/// Default query key that carries the continuation token to the login endpoint
pub const DEFAULT_LOGIN_PARAM: &str = "redirectUrl";

/// Opaque, URL-safe encoding of a preserved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ContinuationToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A decoded continuation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationTarget {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl ContinuationTarget {
    /// Relative URL to replay the original request
    pub fn to_relative_url(&self) -> String {
        render_target(&self.path, &self.params)
    }
}

/// Encodes and decodes continuation tokens and builds the login redirect.
#[derive(Debug, Clone)]
pub struct RedirectStatePreserver {
    login_path: String,
    login_param: String,
}

impl Default for RedirectStatePreserver {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH, DEFAULT_LOGIN_PARAM)
    }
}

impl RedirectStatePreserver {
    pub fn new(login_path: impl Into<String>, login_param: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            login_param: login_param.into(),
        }
    }

    /// Encode `path` and its ordered parameters into a token.
    pub fn encode(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<ContinuationToken, ContinuationError> {
        validate_path(path)?;
        for (name, value) in params {
            if name.is_empty() || name.contains('\0') || value.contains('\0') {
                return Err(ContinuationError::InvalidParameter(name.clone()));
            }
        }

        let target = render_target(path, params);
        Ok(ContinuationToken(
            form_urlencoded::byte_serialize(target.as_bytes()).collect(),
        ))
    }

    /// Decode a token produced by [`RedirectStatePreserver::encode`].
    pub fn decode(&self, token: &str) -> Result<ContinuationTarget, ContinuationError> {
        // The whole token is a single form value: no separators survive encoding.
        let mut pairs = form_urlencoded::parse(token.as_bytes());
        let target = match (pairs.next(), pairs.next()) {
            (Some((target, value)), None) if value.is_empty() => target.into_owned(),
            _ => return Err(ContinuationError::MalformedToken),
        };

        // Reject anything that is not the canonical encoding (lossy UTF-8, stray escapes).
        let canonical: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        if canonical != token {
            return Err(ContinuationError::MalformedToken);
        }

        let (path, params) = match target.split_once('?') {
            Some((_, "")) => return Err(ContinuationError::MalformedToken),
            Some((path, query)) => (
                path,
                parse_query(query).map_err(|_| ContinuationError::MalformedToken)?,
            ),
            None => (target.as_str(), Vec::new()),
        };
        validate_path(path).map_err(|_| ContinuationError::MalformedToken)?;

        Ok(ContinuationTarget {
            path: path.to_string(),
            params,
        })
    }

    /// Location of the login endpoint carrying `token`
    pub fn login_location(&self, token: &ContinuationToken) -> String {
        let separator = if self.login_path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.login_path,
            separator,
            form_urlencoded::byte_serialize(self.login_param.as_bytes()).collect::<String>(),
            token.as_str()
        )
    }
}

fn render_target(path: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(name, value)| (name.as_str(), value.as_str())))
        .finish();
    format!("{path}?{query}")
}

/// Only same-origin absolute paths may be replayed after login.
fn validate_path(path: &str) -> Result<(), ContinuationError> {
    let representable = path.starts_with('/')
        && !path.starts_with("//")
        && !path
            .chars()
            .any(|c| c == '?' || c == '#' || c == '\\' || c.is_control());
    if representable {
        Ok(())
    } else {
        Err(ContinuationError::InvalidPath(path.to_string()))
    }
}
