//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `UNIVERSITY_*` environment variables, and an
//! optional configuration file, in that order of precedence. Unset values fall
//! back to the defaults below. [`AppSettings::validate`] turns the raw values
//! into [`RuntimeSettings`] before anything is bound or connected.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::RateLimitConfig;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 20;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u32 = 10;

/// Raw configuration for the roster service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "UNIVERSITY")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one the service keeps its roster in
    /// memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Requests admitted per rate-limit window.
    pub rate_limit_requests: Option<u32>,
    /// Rate-limit window length in seconds.
    pub rate_limit_window_secs: Option<u32>,
}

/// Settings rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    /// A setting that must be positive was zero.
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    /// The database URL was present but blank.
    #[error("database_url must not be blank")]
    BlankDatabaseUrl,
}

/// Database settings, present only when a URL is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseSettings {
    /// Connection pool configuration sized by `max_connections`.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.url.clone()).with_max_size(self.max_connections)
    }
}

/// Validated settings ready to drive server construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub bind_addr: SocketAddr,
    pub database: Option<DatabaseSettings>,
    pub rate_limit: RateLimitConfig,
}

fn positive(name: &'static str, value: Option<u32>, default: u32) -> Result<u32, SettingsError> {
    match value.unwrap_or(default) {
        0 => Err(SettingsError::Zero { name }),
        value => Ok(value),
    }
}

impl AppSettings {
    /// Validate the raw values and apply defaults.
    ///
    /// # Examples
    /// ```
    /// use roster::settings::AppSettings;
    ///
    /// let settings = AppSettings {
    ///     bind_addr: Some("127.0.0.1:9000".to_owned()),
    ///     database_url: None,
    ///     db_max_connections: None,
    ///     run_migrations: true,
    ///     rate_limit_requests: None,
    ///     rate_limit_window_secs: None,
    /// };
    /// let runtime = settings.validate().expect("valid settings");
    /// assert_eq!(runtime.bind_addr.port(), 9000);
    /// assert!(runtime.database.is_none());
    /// assert_eq!(runtime.rate_limit.requests, 20);
    /// ```
    pub fn validate(&self) -> Result<RuntimeSettings, SettingsError> {
        let raw_addr = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|err| SettingsError::InvalidBindAddr {
                value: raw_addr.to_owned(),
                message: err.to_string(),
            })?;

        let database = match self.database_url.as_deref() {
            None => None,
            Some(url) if url.trim().is_empty() => return Err(SettingsError::BlankDatabaseUrl),
            Some(url) => Some(DatabaseSettings {
                url: url.to_owned(),
                max_connections: positive(
                    "db_max_connections",
                    self.db_max_connections,
                    DEFAULT_DB_MAX_CONNECTIONS,
                )?,
                run_migrations: self.run_migrations,
            }),
        };

        let rate_limit = RateLimitConfig {
            requests: positive(
                "rate_limit_requests",
                self.rate_limit_requests,
                DEFAULT_RATE_LIMIT_REQUESTS,
            )?,
            window_secs: positive(
                "rate_limit_window_secs",
                self.rate_limit_window_secs,
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            )?,
        };

        Ok(RuntimeSettings {
            bind_addr,
            database,
            rate_limit,
        })
    }
}
