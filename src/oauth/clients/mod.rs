//! Client directory and self-registration.

pub mod directory;
pub mod registration;

// Re-export main types and services
pub use directory::{ClientDirectory, CredentialGenerator, RandomCredentials};
pub use registration::ClientRegistrationService;
