//! Schedules and limits of the long-running services.

use std::time::Duration;

use serde::Deserialize;

/// REST API listener.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Valid pair refresh cadence.
#[derive(Debug, Clone, Deserialize)]
pub struct PairsConfig {
    /// Seconds between refreshes once pairs are loaded (default: 3600).
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Seconds between attempts while no pairs are loaded (default: 30).
    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
}

const fn default_refresh_interval_secs() -> u64 {
    3600
}

const fn default_retry_interval_secs() -> u64 {
    30
}

impl Default for PairsConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            retry_interval_secs: default_retry_interval_secs(),
        }
    }
}

impl PairsConfig {
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}

/// Price cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds a fetched price is served from memory (default: 30).
    #[serde(default = "default_price_ttl_secs")]
    pub price_ttl_secs: u64,
}

const fn default_price_ttl_secs() -> u64 {
    30
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            price_ttl_secs: default_price_ttl_secs(),
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn price_ttl(&self) -> Duration {
        Duration::from_secs(self.price_ttl_secs)
    }
}

/// Watchlist notification schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between notification runs (default: 3600).
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_interval_secs() -> u64 {
    3600
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl NotificationConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
