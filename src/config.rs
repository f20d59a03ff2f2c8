//! Environment-based configuration types for authgate server runtime settings.

use anyhow::Result;

use crate::errors::ConfigError;
use crate::oauth::clients::directory::DEFAULT_MAX_ID_ATTEMPTS;
use crate::oauth::continuation::{DEFAULT_LOGIN_PARAM, DEFAULT_LOGIN_PATH};

/// HTTP server port configuration
#[derive(Clone, Debug)]
pub struct HttpPort(u16);

/// Absolute request path on this server (login endpoint, grant stage)
#[derive(Clone, Debug)]
pub struct RequestPath(String);

/// Query parameter name carrying the continuation token to the login endpoint
#[derive(Clone, Debug)]
pub struct LoginRedirectParam(String);

/// Name of the cookie holding the login session id
#[derive(Clone, Debug)]
pub struct SessionCookieName(String);

/// Boolean feature switch
#[derive(Clone, Copy, Debug)]
pub struct Toggle(bool);

/// Upper bound on client_id generation attempts per registration
#[derive(Clone, Copy, Debug)]
pub struct ClientIdMaxAttempts(u32);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub http_port: HttpPort,
    pub external_base: String,
    pub login_path: RequestPath,
    pub login_redirect_param: LoginRedirectParam,
    pub grant_stage_path: RequestPath,
    pub session_cookie_name: SessionCookieName,
    pub storage_backend: String,
    pub database_url: Option<String>,
    pub enable_client_api: Toggle,
    pub client_id_max_attempts: ClientIdMaxAttempts,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let http_port: HttpPort = default_env("HTTP_PORT", "8080").try_into()?;
        let external_base = default_env("EXTERNAL_BASE", "http://localhost:8080");
        let login_path = RequestPath::parse("LOGIN_PATH", default_env("LOGIN_PATH", DEFAULT_LOGIN_PATH))?;
        let login_redirect_param: LoginRedirectParam =
            default_env("LOGIN_REDIRECT_PARAM", DEFAULT_LOGIN_PARAM).try_into()?;
        let grant_stage_path =
            RequestPath::parse("GRANT_STAGE_PATH", default_env("GRANT_STAGE_PATH", "/oauth/grant"))?;
        let session_cookie_name: SessionCookieName =
            default_env("SESSION_COOKIE_NAME", "authgate_session").try_into()?;
        let storage_backend = default_env("STORAGE_BACKEND", "memory");
        let database_url = optional_env("DATABASE_URL");
        let enable_client_api: Toggle = default_env("ENABLE_CLIENT_API", "true").try_into()?;
        let client_id_max_attempts: ClientIdMaxAttempts = default_env(
            "CLIENT_ID_MAX_ATTEMPTS",
            &DEFAULT_MAX_ID_ATTEMPTS.to_string(),
        )
        .try_into()?;

        Ok(Self {
            version: version()?,
            http_port,
            external_base,
            login_path,
            login_redirect_param,
            grant_stage_path,
            session_cookie_name,
            storage_backend,
            database_url,
            enable_client_api,
            client_id_max_attempts,
        })
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

impl TryFrom<String> for HttpPort {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Self(8080))
        } else {
            value
                .parse::<u16>()
                .map(Self)
                .map_err(|err| ConfigError::PortParsingFailed(err).into())
        }
    }
}

impl AsRef<u16> for HttpPort {
    fn as_ref(&self) -> &u16 {
        &self.0
    }
}

impl RequestPath {
    /// Validate `value` as an absolute path for the setting `name`
    pub fn parse(name: &str, value: String) -> Result<Self> {
        if value.starts_with('/') && !value.starts_with("//") && !value.contains('#') {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidPath(name.to_string(), value).into())
        }
    }
}

impl AsRef<str> for RequestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_token_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl TryFrom<String> for LoginRedirectParam {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_token_name(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidName("LOGIN_REDIRECT_PARAM".to_string(), value).into())
        }
    }
}

impl AsRef<str> for LoginRedirectParam {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionCookieName {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_token_name(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidName("SESSION_COOKIE_NAME".to_string(), value).into())
        }
    }
}

impl AsRef<str> for SessionCookieName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Toggle {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Self(true)),
            "false" | "0" | "no" | "off" => Ok(Self(false)),
            _ => Err(ConfigError::BoolParsingFailed(value).into()),
        }
    }
}

impl AsRef<bool> for Toggle {
    fn as_ref(&self) -> &bool {
        &self.0
    }
}

impl TryFrom<String> for ClientIdMaxAttempts {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(attempts) if attempts > 0 => Ok(Self(attempts)),
            _ => Err(ConfigError::InvalidNumber("CLIENT_ID_MAX_ATTEMPTS".to_string(), value).into()),
        }
    }
}

impl AsRef<u32> for ClientIdMaxAttempts {
    fn as_ref(&self) -> &u32 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_port() {
        let port: HttpPort = "9090".to_string().try_into().unwrap();
        assert_eq!(*port.as_ref(), 9090);
        let port: HttpPort = "".to_string().try_into().unwrap();
        assert_eq!(*port.as_ref(), 8080);
        assert!(HttpPort::try_from("http".to_string()).is_err());
    }

    #[test]
    fn test_request_path() {
        assert!(RequestPath::parse("LOGIN_PATH", "/r/oauth/login".to_string()).is_ok());
        assert!(RequestPath::parse("LOGIN_PATH", "login".to_string()).is_err());
        assert!(RequestPath::parse("LOGIN_PATH", "//evil.example/login".to_string()).is_err());
        assert!(RequestPath::parse("LOGIN_PATH", "https://evil.example/login".to_string()).is_err());
    }

    #[test]
    fn test_toggle() {
        for value in ["true", "1", "YES", "on"] {
            assert!(*Toggle::try_from(value.to_string()).unwrap().as_ref());
        }
        for value in ["false", "0", "no", "Off"] {
            assert!(!*Toggle::try_from(value.to_string()).unwrap().as_ref());
        }
        assert!(Toggle::try_from("maybe".to_string()).is_err());
    }

    #[test]
    fn test_names() {
        assert!(LoginRedirectParam::try_from("redirectUrl".to_string()).is_ok());
        assert!(LoginRedirectParam::try_from("redirect url".to_string()).is_err());
        assert!(SessionCookieName::try_from("".to_string()).is_err());
        assert!(SessionCookieName::try_from("sid;x".to_string()).is_err());
    }

    #[test]
    fn test_client_id_max_attempts() {
        let attempts: ClientIdMaxAttempts = "3".to_string().try_into().unwrap();
        assert_eq!(*attempts.as_ref(), 3);
        assert!(ClientIdMaxAttempts::try_from("0".to_string()).is_err());
        assert!(ClientIdMaxAttempts::try_from("many".to_string()).is_err());
    }
}
