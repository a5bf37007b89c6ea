//! HTTP inbound adapter exposing the REST endpoints.
//!
//! ## Routes
//!
//! * `/`, `/offences`, `/areas`, `/years`, `/genders`, `/ages`,
//!   `/area/{council}` - public dataset listings
//! * `/search` - bearer-token protected aggregation
//! * `/register`, `/login` - accounts
//! * `/health/ready`, `/health/live` - probes

pub mod accounts;
pub mod auth;
pub mod error;
pub mod health;
pub mod offences;
pub mod schemas;
pub mod search;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every route and the payload error handlers.
///
/// Callers supply `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// [`HttpState`]: state::HttpState
/// [`HealthState`]: health::HealthState
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::FormConfig::default().error_handler(error::form_error_handler))
        .service(offences::welcome)
        .service(offences::list_offences)
        .service(offences::list_areas)
        .service(offences::list_years)
        .service(offences::list_genders)
        .service(offences::list_ages)
        .service(offences::area_detail)
        .service(search::search)
        .service(accounts::register)
        .service(accounts::login)
        .service(health::ready)
        .service(health::live);
}
