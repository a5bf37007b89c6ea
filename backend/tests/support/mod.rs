//! Shared helpers for backend integration tests.

pub mod doubles;

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use offences_api::Trace;
use offences_api::domain::ports::AccessTokens;
use offences_api::domain::{OffenceStatsService, PasswordAccountService};
use offences_api::inbound::http::configure_routes;
use offences_api::inbound::http::health::HealthState;
use offences_api::inbound::http::state::HttpState;
use offences_api::outbound::security::{BcryptPasswordHasher, JwtAccessTokens, MIN_BCRYPT_COST};

use doubles::{InMemoryOffenceRepository, InMemoryUserRepository};

/// Signing secret shared by the app under test and token helpers.
pub const TEST_SECRET: &[u8] = b"integration-test-secret";
/// Token lifetime used by the app under test.
pub const TEST_TTL_SECS: u64 = 86_400;

/// Real domain services and security adapters over in-memory stores.
pub fn http_state(offences: InMemoryOffenceRepository) -> HttpState {
    let tokens: Arc<dyn AccessTokens> = Arc::new(JwtAccessTokens::new(TEST_SECRET, TEST_TTL_SECS));
    let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("minimum cost is valid");
    let accounts = PasswordAccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(hasher),
        tokens.clone(),
    );
    HttpState::new(
        Arc::new(OffenceStatsService::new(Arc::new(offences))),
        Arc::new(accounts),
        tokens,
    )
}

/// Application wired the way the server binary wires it.
pub fn build_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(health))
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_routes)
}
