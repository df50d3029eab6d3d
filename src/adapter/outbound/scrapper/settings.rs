//! Scrapper client configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// Where the bot finds the scrapper REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapperConfig {
    /// Base URL including the `/api/crypto` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api/crypto".into()
}

impl Default for ScrapperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            http: HttpConfig::default(),
        }
    }
}
