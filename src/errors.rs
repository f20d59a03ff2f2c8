//! Standardized error types following the `error-authgate-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when a required environment variable is not set
    #[error("error-authgate-config-1 {0} must be set")]
    EnvVarRequired(String),

    /// Error when HTTP_PORT cannot be parsed
    #[error("error-authgate-config-2 Parsing HTTP_PORT into u16 failed: {0:?}")]
    PortParsingFailed(std::num::ParseIntError),

    /// Error when version information is not available
    #[error("error-authgate-config-3 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when boolean string cannot be parsed
    #[error(
        "error-authgate-config-4 Failed to parse boolean '{0}': expected true/false/1/0/yes/no/on/off"
    )]
    BoolParsingFailed(String),

    /// Error when a configured path is not an absolute request path
    #[error("error-authgate-config-5 {0} must be an absolute path starting with '/': '{1}'")]
    InvalidPath(String, String),

    /// Error when a numeric setting cannot be parsed or is out of range
    #[error("error-authgate-config-6 Invalid value for {0}: '{1}'")]
    InvalidNumber(String, String),

    /// Error when a name-like setting is empty or contains reserved characters
    #[error("error-authgate-config-7 Invalid value for {0}: '{1}'")]
    InvalidName(String, String),
}

/// Client registration errors
#[derive(Debug, Error)]
pub enum ClientRegistrationError {
    /// One or more required registration fields are blank or missing
    #[error("error-authgate-client-1 Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Client registration disabled
    #[error("error-authgate-client-2 Client registration disabled")]
    RegistrationDisabled,

    /// Every generated client_id collided with an existing client
    #[error("error-authgate-client-3 Unable to allocate a unique client_id after {0} attempts")]
    IdentifierExhausted(u32),

    /// The client store failed while registering
    #[error("error-authgate-client-4 Client storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Database/storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when database connection fails
    #[error("error-authgate-storage-1 Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Error when query execution fails
    #[error("error-authgate-storage-2 Query execution failed: {0}")]
    QueryFailed(String),

    /// Error when a stored row cannot be mapped back into a record
    #[error("error-authgate-storage-3 Invalid data: {0}")]
    InvalidData(String),

    /// Error when an in-process lock has been poisoned
    #[error("error-authgate-storage-4 Lock poisoned: {0}")]
    LockPoisoned(String),

    /// Error when database migrations fail
    #[error("error-authgate-storage-5 Migration failed: {0}")]
    MigrationFailed(String),
}

/// Identity (session) lookup errors
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The session backend could not be queried
    #[error("error-authgate-identity-1 Session lookup failed: {0}")]
    SessionLookupFailed(String),
}

/// Inbound authorization request errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// A query pair does not percent-decode to valid UTF-8
    #[error("error-authgate-request-1 Parameter is not valid UTF-8: {0}")]
    InvalidEncoding(String),
}

/// Continuation token errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContinuationError {
    /// The request path cannot be represented as a relative redirect target
    #[error("error-authgate-continuation-1 Unrepresentable request path: {0:?}")]
    InvalidPath(String),

    /// A parameter name or value contains characters that cannot be carried
    #[error("error-authgate-continuation-2 Unrepresentable parameter: {0:?}")]
    InvalidParameter(String),

    /// The token does not decode to a well-formed target
    #[error("error-authgate-continuation-3 Malformed continuation token")]
    MalformedToken,
}

/// Fatal failures raised while handing an authorization request off
#[derive(Debug, Error)]
pub enum HandoffError {
    /// The continuation token could not represent the original request
    #[error(transparent)]
    Encoding(#[from] ContinuationError),

    /// The client directory could not be read
    #[error(transparent)]
    Directory(#[from] StorageError),

    /// The identity resolver could not be read
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The downstream grant stage failed
    #[error("error-authgate-handoff-1 Downstream grant stage failed: {0}")]
    Downstream(String),
}
