//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations translate between Diesel rows and domain types
//! and hold no business logic. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module. Connections come
//! from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use offences_api::outbound::persistence::{DbPool, DieselOffenceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/offences")).await?;
//! let repo = DieselOffenceRepository::new(pool);
//! ```

mod diesel_helpers;
mod diesel_offence_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_offence_repository::DieselOffenceRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
