//! HTTP server configuration object.

use std::net::SocketAddr;

use offences_api::outbound::persistence::DbPool;
use offences_api::outbound::security::{BcryptPasswordHasher, JwtAccessTokens};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Everything [`super::create_server`] needs to wire adapters and bind.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) hasher: BcryptPasswordHasher,
    pub(crate) tokens: JwtAccessTokens,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from prepared adapters.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        db_pool: DbPool,
        hasher: BcryptPasswordHasher,
        tokens: JwtAccessTokens,
    ) -> Self {
        Self {
            bind_addr,
            db_pool,
            hasher,
            tokens,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
