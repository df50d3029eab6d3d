//! Binance exchange configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;
use crate::domain::QuoteAsset;

/// Binance REST API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceConfig {
    /// REST base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Quote asset tracked pairs are priced in.
    #[serde(default)]
    pub quote_asset: QuoteAsset,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_api_url() -> String {
    "https://api.binance.com".into()
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            quote_asset: QuoteAsset::default(),
            http: HttpConfig::default(),
        }
    }
}
