//! Driven port for issuing and checking bearer tokens.

use crate::domain::{AccessToken, Email};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum AccessTokenError {
        /// Token was malformed, expired, or signed with another key.
        Invalid { message: String } => "access token rejected: {message}",
        /// Token could not be signed.
        Signing { message: String } => "access token signing failed: {message}",
    }
}

/// Issue signed tokens for an account and verify presented ones.
///
/// Signing is CPU-bound and quick, so the port is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokens: Send + Sync {
    /// Issue a token whose subject is `email`.
    fn issue(&self, email: &Email) -> Result<AccessToken, AccessTokenError>;

    /// Verify `token` and return its subject.
    fn verify(&self, token: &str) -> Result<Email, AccessTokenError>;
}
