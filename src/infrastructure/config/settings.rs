//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the bot token comes from the
//! `TELEGRAM_BOT_TOKEN` environment variable. Every section is optional.
//!
//! # Example
//!
//! ```no_run
//! use tickerbot::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::service::{CacheConfig, NotificationConfig, PairsConfig, ServerConfig};
use super::storage::{StorageBackend, StorageConfig};
use super::telegram::{TelegramConfig, BOT_TOKEN_ENV};
use crate::adapter::outbound::binance::BinanceConfig;
use crate::adapter::outbound::http::HttpConfig;
use crate::adapter::outbound::scrapper::ScrapperConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Binance REST API and quote asset.
    #[serde(default)]
    pub exchange: BinanceConfig,

    /// Valid pair refresh schedule.
    #[serde(default)]
    pub pairs: PairsConfig,

    /// Price cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Watchlist storage backend.
    #[serde(default)]
    pub storage: StorageConfig,

    /// REST API listener (scrapper and standalone modes).
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote scrapper used by the bot mode.
    #[serde(default)]
    pub scrapper: ScrapperConfig,

    /// Telegram bot settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Scheduled watchlist notifications.
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Secrets come from the environment, never from the file.
        config.telegram.bot_token = std::env::var(BOT_TOKEN_ENV).ok();

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Listener address of the REST API.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if `bind_addr` is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    field: "bind_addr",
                    reason: e.to_string(),
                }
                .into()
            })
    }

    /// Key settings as `(name, value)` rows for `check config`.
    #[must_use]
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("exchange.api_url", self.exchange.api_url.clone()),
            ("exchange.quote_asset", self.exchange.quote_asset.to_string()),
            ("storage.backend", self.storage.backend.to_string()),
            ("storage.database", self.storage.database.clone()),
            ("server.bind_addr", self.server.bind_addr.clone()),
            ("scrapper.base_url", self.scrapper.base_url.clone()),
            ("cache.price_ttl_secs", self.cache.price_ttl_secs.to_string()),
            (
                "pairs.refresh_interval_secs",
                self.pairs.refresh_interval_secs.to_string(),
            ),
            (
                "notification.interval_secs",
                self.notification.interval_secs.to_string(),
            ),
            (
                "telegram.bot_token",
                if self.telegram.token().is_ok() { "set" } else { "missing" }.to_string(),
            ),
        ]
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.exchange.api_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        url::Url::parse(&self.exchange.api_url).map_err(|e| ConfigError::InvalidValue {
            field: "api_url",
            reason: e.to_string(),
        })?;
        url::Url::parse(&self.scrapper.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        self.bind_addr()?;

        validate_http("exchange.http", &self.exchange.http)?;
        validate_http("scrapper.http", &self.scrapper.http)?;

        validate_interval("price_ttl_secs", self.cache.price_ttl_secs)?;
        validate_interval("refresh_interval_secs", self.pairs.refresh_interval_secs)?;
        validate_interval("retry_interval_secs", self.pairs.retry_interval_secs)?;
        validate_interval("interval_secs", self.notification.interval_secs)?;
        if self.storage.backend == StorageBackend::Sqlite && self.storage.database.trim().is_empty()
        {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        Ok(())
    }
}

/// Longest accepted interval or TTL: one week.
pub const MAX_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

#[allow(clippy::result_large_err)]
fn validate_interval(field: &'static str, secs: u64) -> Result<()> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    if secs > MAX_INTERVAL_SECS {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be at most {MAX_INTERVAL_SECS} (one week)"),
        }
        .into());
    }
    Ok(())
}

#[allow(clippy::result_large_err)]
fn validate_http(section: &'static str, http: &HttpConfig) -> Result<()> {
    if http.timeout_ms == 0 || http.connect_timeout_ms == 0 {
        return Err(ConfigError::InvalidValue {
            field: section,
            reason: "timeouts must be greater than 0".to_string(),
        }
        .into());
    }
    if http.retry_max_attempts == 0 {
        return Err(ConfigError::InvalidValue {
            field: section,
            reason: "retry_max_attempts must be at least 1".to_string(),
        }
        .into());
    }
    Ok(())
}
