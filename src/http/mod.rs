//! Axum HTTP handlers exposing the authorization handoff and client registration.

pub mod context;
pub mod grant_stage;
mod handler_authorize;
mod handler_clients;
mod handler_health;
pub mod server;
mod utils_oauth;

pub use context::{AppState, SharedGrantStage};
pub use grant_stage::ForwardingGrantStage;
pub use server::build_router;
