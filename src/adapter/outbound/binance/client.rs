//! Binance public REST client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::dto::{ApiError, ExchangeInfo, TickerPrice, INVALID_SYMBOL};
use super::settings::BinanceConfig;
use crate::adapter::outbound::http::RetryingClient;
use crate::domain::{Price, Symbol};
use crate::error::{Error, Result};
use crate::port::outbound::exchange::ExchangeGateway;

/// HTTP client for the Binance spot API. Only public endpoints are used.
pub struct BinanceClient {
    http: RetryingClient,
    base_url: Url,
}

impl BinanceClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`Error::Url`] if `api_url` is not a valid URL.
    pub fn from_config(config: &BinanceConfig) -> Result<Self> {
        Ok(Self {
            http: RetryingClient::from_config(&config.http),
            base_url: Url::parse(&config.api_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET `url` and decode the JSON body. Non-2xx answers become
    /// [`Error::Exchange`] carrying the Binance error code when present.
    async fn get_json<T>(&self, url: &Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.http.send(|http| http.get(url.clone())).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn api_error(status: StatusCode, body: &str) -> Error {
        let message = match serde_json::from_str::<ApiError>(body) {
            Ok(err) => format!("{} (code {})", err.msg, err.code),
            Err(_) => body.chars().take(200).collect(),
        };
        Error::Exchange {
            status: status.as_u16(),
            message,
        }
    }

    fn is_unknown_symbol(err: &Error) -> bool {
        match err {
            Error::Exchange { status, message } => {
                *status == StatusCode::BAD_REQUEST.as_u16()
                    && message.contains(&format!("code {INVALID_SYMBOL}"))
            }
            _ => false,
        }
    }
}

#[async_trait]
impl ExchangeGateway for BinanceClient {
    async fn fetch_price(&self, symbol: &Symbol) -> Result<Option<Price>> {
        let mut url = self.endpoint("/api/v3/ticker/price")?;
        url.query_pairs_mut().append_pair("symbol", symbol.as_str());

        match self.get_json::<TickerPrice>(&url).await {
            Ok(ticker) => {
                let price: Price = ticker.price.parse()?;
                debug!(symbol = %ticker.symbol, %price, "Fetched price");
                Ok(Some(price))
            }
            Err(e) if Self::is_unknown_symbol(&e) => {
                debug!(symbol = %symbol, "Exchange does not know symbol");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_valid_pairs(&self) -> Result<Vec<String>> {
        let url = self.endpoint("/api/v3/exchangeInfo")?;
        info!(url = %url, "Fetching exchange info");

        let info: ExchangeInfo = self.get_json(&url).await?;
        let total = info.symbols.len();
        let trading: Vec<String> = info
            .symbols
            .into_iter()
            .filter(|s| s.is_trading())
            .map(|s| s.symbol)
            .collect();

        debug!(total, trading = trading.len(), "Fetched exchange symbols");
        Ok(trading)
    }

    fn name(&self) -> &'static str {
        "binance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::http::HttpConfig;
    use axum::extract::Query;
    use axum::http::StatusCode as AxumStatus;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::collections::HashMap;

    async fn ticker(Query(params): Query<HashMap<String, String>>) -> Response {
        match params.get("symbol").map(String::as_str) {
            Some("BTCUSDT") => {
                Json(json!({"symbol": "BTCUSDT", "price": "65000.01000000"})).into_response()
            }
            Some("BOOMUSDT") => (AxumStatus::INTERNAL_SERVER_ERROR, "boom").into_response(),
            _ => (
                AxumStatus::BAD_REQUEST,
                Json(json!({"code": -1121, "msg": "Invalid symbol."})),
            )
                .into_response(),
        }
    }

    async fn exchange_info() -> Json<serde_json::Value> {
        Json(json!({
            "symbols": [
                {"symbol": "BTCUSDT", "status": "TRADING"},
                {"symbol": "ETHBTC", "status": "TRADING"},
                {"symbol": "LUNAUSDT", "status": "BREAK"}
            ]
        }))
    }

    async fn fake_binance() -> BinanceClient {
        let app = Router::new()
            .route("/api/v3/ticker/price", get(ticker))
            .route("/api/v3/exchangeInfo", get(exchange_info));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = BinanceConfig {
            api_url: format!("http://{addr}"),
            http: HttpConfig {
                retry_backoff_ms: 0,
                ..HttpConfig::default()
            },
            ..BinanceConfig::default()
        };
        BinanceClient::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn fetch_price_parses_decimal_string() {
        let client = fake_binance().await;

        let price = client.fetch_price(&Symbol::new("BTCUSDT")).await.unwrap();

        assert_eq!(price, Some(Price::new(dec!(65000.01))));
    }

    #[tokio::test]
    async fn unknown_symbol_is_none() {
        let client = fake_binance().await;

        let price = client.fetch_price(&Symbol::new("NOPEUSDT")).await.unwrap();

        assert_eq!(price, None);
    }

    #[tokio::test]
    async fn server_error_is_exchange_error() {
        let client = fake_binance().await;

        let err = client.fetch_price(&Symbol::new("BOOMUSDT")).await.unwrap_err();

        assert!(matches!(err, Error::Exchange { status: 500, .. }));
    }

    #[tokio::test]
    async fn valid_pairs_keep_trading_symbols_only() {
        let client = fake_binance().await;

        let pairs = client.fetch_valid_pairs().await.unwrap();

        assert_eq!(pairs, vec!["BTCUSDT".to_string(), "ETHBTC".to_string()]);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = BinanceConfig {
            api_url: "not a url".into(),
            ..BinanceConfig::default()
        };
        assert!(matches!(
            BinanceClient::from_config(&config),
            Err(Error::Url(_))
        ));
    }
}
