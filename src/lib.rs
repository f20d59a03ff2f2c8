//! authgate library crate.
//!
//! Front door of an OAuth 2.0 authorization server: resolves the requesting
//! client, sends unauthenticated callers to log in with their request
//! preserved, hands authenticated requests to the grant stage, and lets
//! applications register themselves as clients.

pub mod config;
pub mod errors;
pub mod http;
pub mod oauth;
pub mod storage;
