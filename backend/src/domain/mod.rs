//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed entities used by the HTTP and persistence
//! adapters, together with the use-case services that orchestrate them. Keep
//! types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User / Email / PasswordHash: registered account primitives.
//! - Credentials / AccessToken: authentication inputs and outputs.
//! - OffenceColumn / Area / SearchRequest: offence dataset read model.
//! - OffenceStatsService / PasswordAccountService: use-case services.

pub mod auth;
pub mod error;
pub mod offences;
pub mod ports;
pub mod trace_id;
pub mod user;

mod account_service;
mod offence_stats_service;

pub use self::account_service::{
    PasswordAccountService, USER_EXISTS_MESSAGE, WRONG_CREDENTIALS_MESSAGE,
};
pub use self::auth::{AccessToken, BEARER_TOKEN_TYPE, Credentials, CredentialsValidationError};
pub use self::error::{DATABASE_UNAVAILABLE_MESSAGE, Error, ErrorCode, ErrorValidationError};
pub use self::offence_stats_service::OffenceStatsService;
pub use self::offences::{
    Area, AreaTotal, Dimension, INVALID_QUERY_MESSAGE, OFFENCE_KEY, OffenceColumn,
    OffenceValidationError, SearchFilters, SearchOutcome, SearchRequest, SearchValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, PasswordHash, User, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use offences_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("your token is not authorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
