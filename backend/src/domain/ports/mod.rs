//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`OffenceStatsQuery`, `AccountService`) are called by inbound
//! adapters. Driven ports are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_tokens;
mod account_service;
mod offence_repository;
mod offence_stats_query;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use access_tokens::MockAccessTokens;
pub use access_tokens::{AccessTokenError, AccessTokens};
pub use account_service::AccountService;
#[cfg(test)]
pub use offence_repository::MockOffenceRepository;
pub use offence_repository::{OffenceRepository, OffenceRepositoryError};
pub use offence_stats_query::OffenceStatsQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
