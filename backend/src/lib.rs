//! Queensland offences API library.
//!
//! Hexagonal layout: `domain` holds entities, ports, and services;
//! `inbound::http` adapts them to actix-web; `outbound` implements the driven
//! ports against PostgreSQL, bcrypt, and JWT.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
