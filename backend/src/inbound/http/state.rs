//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccessTokens, AccountService, OffenceStatsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Offence dataset queries.
    pub offences: Arc<dyn OffenceStatsQuery>,
    /// Registration and login.
    pub accounts: Arc<dyn AccountService>,
    /// Bearer token verification for protected routes.
    pub tokens: Arc<dyn AccessTokens>,
}

impl HttpState {
    /// Bundle the ports used by the HTTP handlers.
    pub fn new(
        offences: Arc<dyn OffenceStatsQuery>,
        accounts: Arc<dyn AccountService>,
        tokens: Arc<dyn AccessTokens>,
    ) -> Self {
        Self {
            offences,
            accounts,
            tokens,
        }
    }
}
