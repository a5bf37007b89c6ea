//! Account service implementing [`AccountService`] over the user store, the
//! password hasher, and the token issuer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccessTokenError, AccessTokens, AccountService, PasswordHasher, PasswordHasherError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{AccessToken, Credentials, DATABASE_UNAVAILABLE_MESSAGE, Email, Error, User};

/// Message returned when registering an email that is already taken.
pub const USER_EXISTS_MESSAGE: &str = "User already exists";
/// Message returned for any failed login.
pub const WRONG_CREDENTIALS_MESSAGE: &str = "Wrong email or password";

/// Password-based account service.
#[derive(Clone)]
pub struct PasswordAccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<dyn AccessTokens>,
}

impl<U, H> PasswordAccountService<U, H> {
    /// Create a new service.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<dyn AccessTokens>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    debug!(%error, "user repository call failed");
    match error {
        UserPersistenceError::Connection { .. } => {
            Error::service_unavailable(DATABASE_UNAVAILABLE_MESSAGE)
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => Error::invalid_request(USER_EXISTS_MESSAGE),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: AccessTokenError) -> Error {
    Error::internal(error.to_string())
}

fn wrong_credentials() -> Error {
    Error::invalid_request(WRONG_CREDENTIALS_MESSAGE)
}

#[async_trait]
impl<U, H> AccountService for PasswordAccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, credentials: &Credentials) -> Result<Email, Error> {
        let hash = self
            .hasher
            .hash(credentials.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(credentials.email().clone(), hash);
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(email = %user.email(), "account registered");
        Ok(user.email().clone())
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!(email = %credentials.email(), "login for unknown account");
            return Err(wrong_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
            .map_err(map_hasher_error)?;
        if !matches {
            debug!(email = %credentials.email(), "login with wrong password");
            return Err(wrong_credentials());
        }

        self.tokens.issue(user.email()).map_err(map_token_error)
    }
}
