//! Driving port for registration and login.

use async_trait::async_trait;

use crate::domain::{AccessToken, Credentials, Email, Error};

/// Account use-cases exposed to inbound adapters.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account; `invalid_request` when the email is already taken.
    async fn register(&self, credentials: &Credentials) -> Result<Email, Error>;

    /// Check credentials and issue a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error>;
}
