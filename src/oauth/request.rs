//! Transport-independent view of an inbound authorization request.

use percent_encoding::percent_decode_str;

use crate::errors::RequestError;

/// Ambient session state for a request, passed explicitly instead of read from a global.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    session_id: Option<String>,
}

impl SessionContext {
    pub fn new(session_id: Option<String>) -> Self {
        Self {
            session_id: session_id.filter(|id| !id.is_empty()),
        }
    }

    /// A context with no session at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }
}

/// Path, ordered query parameters and session of an authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequestContext {
    path: String,
    params: Vec<(String, String)>,
    session: SessionContext,
}

impl AuthorizationRequestContext {
    pub fn new(path: impl Into<String>, params: Vec<(String, String)>, session: SessionContext) -> Self {
        Self {
            path: path.into(),
            params,
            session,
        }
    }

    /// Build a context from a raw, still percent-encoded query string.
    ///
    /// Pairs are split as `application/x-www-form-urlencoded`, but decoding is
    /// strict: a name or value whose bytes are not UTF-8 is an error, never
    /// replaced.
    pub fn from_query(
        path: impl Into<String>,
        query: Option<&str>,
        session: SessionContext,
    ) -> Result<Self, RequestError> {
        let params = parse_query(query.unwrap_or_default())?;
        Ok(Self::new(path, params, session))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value submitted for `name`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// How many times `name` was submitted
    pub fn occurrences(&self, name: &str) -> usize {
        self.params.iter().filter(|(key, _)| key == name).count()
    }

    /// Distinct parameter names in submission order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.params.len());
        for (key, _) in &self.params {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
        names
    }

    /// Every submitted pair, duplicates included, in submission order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// The single non-blank client_id. A repeated client_id yields `None`.
    pub fn client_id(&self) -> Option<&str> {
        if self.occurrences("client_id") != 1 {
            return None;
        }
        self.param("client_id").filter(|id| !id.trim().is_empty())
    }
}

/// Split a query into ordered pairs, rejecting anything that is not UTF-8
pub(crate) fn parse_query(query: &str) -> Result<Vec<(String, String)>, RequestError> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(name, pair)?, decode_component(value, pair)?))
        })
        .collect()
}

fn decode_component(raw: &str, pair: &str) -> Result<String, RequestError> {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RequestError::InvalidEncoding(pair.to_string()))
}
