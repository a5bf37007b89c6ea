//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt is deliberately slow, so both operations run on the blocking pool
//! with the caller's trace id re-entered there.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Lowest cost bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Password hasher using bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHasherError::Hashing`] when `cost` is outside
    /// `4..=31`.
    pub fn new(cost: u32) -> Result<Self, PasswordHasherError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordHasherError::hashing(format!(
                "bcrypt cost {cost} is outside {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}"
            )));
        }
        Ok(Self { cost })
    }
}

async fn run_blocking<F, T>(work: F) -> Result<T, PasswordHasherError>
where
    F: FnOnce() -> Result<T, bcrypt::BcryptError> + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    let outcome = tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await
    .map_err(|err| PasswordHasherError::hashing(format!("bcrypt task failed: {err}")))?;

    outcome.map_err(|err| {
        warn!(error = %err, "bcrypt operation failed");
        PasswordHasherError::hashing(err.to_string())
    })
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let encoded = run_blocking(move || bcrypt::hash(password.as_bytes(), cost)).await?;
        PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = zeroize::Zeroizing::new(password.to_owned());
        let encoded = hash.as_ref().to_owned();
        run_blocking(move || bcrypt::verify(password.as_bytes(), &encoded)).await
    }
}
