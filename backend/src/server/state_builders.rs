//! Wiring of outbound adapters into domain services and HTTP state.

use std::sync::Arc;

use actix_web::web;

use offences_api::domain::ports::AccessTokens;
use offences_api::domain::{OffenceStatsService, PasswordAccountService};
use offences_api::inbound::http::state::HttpState;
use offences_api::outbound::persistence::{DieselOffenceRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the shared handler state from the configured adapters.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let offences = OffenceStatsService::new(Arc::new(DieselOffenceRepository::new(
        config.db_pool.clone(),
    )));
    let tokens: Arc<dyn AccessTokens> = Arc::new(config.tokens.clone());
    let accounts = PasswordAccountService::new(
        Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        Arc::new(config.hasher),
        tokens.clone(),
    );

    web::Data::new(HttpState::new(
        Arc::new(offences),
        Arc::new(accounts),
        tokens,
    ))
}
