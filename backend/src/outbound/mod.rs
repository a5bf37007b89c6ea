//! Outbound adapters implementing the domain's driven ports.
//!
//! - `persistence`: PostgreSQL via Diesel and `diesel-async`.
//! - `security`: bcrypt password hashing and JWT bearer tokens.

pub mod persistence;
pub mod security;
