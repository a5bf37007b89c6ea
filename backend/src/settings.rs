//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `OFFENCES_API_*` environment variables, and
//! configuration files, in the precedence OrthoConfig applies.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use rand::Rng;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
/// Default bearer-token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;
/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Default database pool size.
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

const EPHEMERAL_SECRET_LEN: usize = 32;

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("database URL is not configured; set OFFENCES_API_DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("bind address `{value}` is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("JWT secret is not configured; set OFFENCES_API_JWT_SECRET")]
    MissingJwtSecret,
}

/// Runtime configuration for the API server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OFFENCES_API")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// HS256 signing secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// Permit a random signing secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Bearer-token lifetime in seconds.
    #[ortho_config(default = 86400)]
    pub token_ttl_secs: u64,
    /// bcrypt work factor.
    #[ortho_config(default = 12)]
    pub bcrypt_cost: u32,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl AppSettings {
    /// Configured database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Configured listen address, falling back to [`DEFAULT_BIND_ADDR`].
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).trim();
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Signing secret bytes.
    ///
    /// Without a configured secret, debug builds and deployments that set
    /// `allow_ephemeral_secret` get a random per-process secret; tokens then
    /// stop verifying after a restart.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        resolve_jwt_secret(
            self.jwt_secret.as_deref(),
            cfg!(debug_assertions) || self.allow_ephemeral_secret,
        )
    }
}

fn resolve_jwt_secret(
    configured: Option<&str>,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
    match configured.filter(|secret| !secret.is_empty()) {
        Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
        None if allow_ephemeral => {
            warn!("using ephemeral JWT secret (dev only)");
            let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            rand::thread_rng().fill(secret.as_mut_slice());
            Ok(secret)
        }
        None => Err(SettingsError::MissingJwtSecret),
    }
}
