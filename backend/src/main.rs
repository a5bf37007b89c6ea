//! Server entry-point: loads settings, builds adapters, and serves the API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use offences_api::inbound::http::health::HealthState;
use offences_api::outbound::persistence::{DbPool, PoolConfig};
use offences_api::outbound::security::{BcryptPasswordHasher, JwtAccessTokens};
use offences_api::settings::AppSettings;
use server::{ServerConfig, create_server};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("failed to load settings", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("invalid settings", err))?;
    let database_url = settings
        .database_url()
        .map_err(|err| startup_error("invalid settings", err))?;
    let secret = settings
        .jwt_secret()
        .map_err(|err| startup_error("invalid settings", err))?;

    let hasher = BcryptPasswordHasher::new(settings.bcrypt_cost)
        .map_err(|err| startup_error("invalid bcrypt cost", err))?;
    let tokens = JwtAccessTokens::new(&secret, settings.token_ttl_secs);
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size))
        .await
        .map_err(|err| startup_error("failed to build database pool", err))?;

    let config = ServerConfig::new(bind_addr, pool, hasher, tokens);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(make_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "offences API listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Option<actix_web_prom::PrometheusMetrics> {
    match PrometheusMetricsBuilder::new("offences_api")
        .endpoint("/metrics")
        .build()
    {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "Prometheus metrics disabled");
            None
        }
    }
}
