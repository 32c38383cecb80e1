//! Driving port for passenger sign-in and sign-up.
//!
//! Inbound adapters call this port with validated forms and receive a domain
//! session or a domain [`Error`]; the platform behind it stays hidden.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, SignInCredentials, SignUpRequest};

/// Domain use-case port for account access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountAccess: Send + Sync {
    /// Authenticate existing credentials.
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession, Error>;

    /// Create a passenger account.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession, Error>;
}
