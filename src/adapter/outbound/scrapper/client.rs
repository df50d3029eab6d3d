//! HTTP client for the scrapper REST API.

use std::collections::BTreeSet;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::settings::ScrapperConfig;
use crate::adapter::outbound::http::RetryingClient;
use crate::domain::{ChatId, Price, QuoteAsset, Symbol, Watchlist};
use crate::error::Result;
use crate::port::inbound::tracker::{PriceQuote, TrackerApi, TrackerError};

/// [`TrackerApi`] backed by a remote scrapper.
///
/// Tickers are normalized locally before they go on the wire, so the path
/// segments are always plain alphanumerics.
pub struct ScrapperClient {
    http: RetryingClient,
    base_url: String,
    quote: QuoteAsset,
}

impl ScrapperClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`crate::error::Error::Url`] if `base_url` is not a valid URL.
    pub fn from_config(config: &ScrapperConfig, quote: QuoteAsset) -> Result<Self> {
        Url::parse(&config.base_url)?;
        Ok(Self {
            http: RetryingClient::from_config(&config.http),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            quote,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn normalize(&self, ticker: &str) -> std::result::Result<Symbol, TrackerError> {
        Symbol::normalize(ticker, &self.quote).map_err(|_| TrackerError::invalid(ticker))
    }

    /// Read a successful body, mapping error statuses to [`TrackerError`].
    ///
    /// `lookup` is the raw ticker and its normalized symbol for calls about
    /// one ticker: a 400 reports the raw input, a 404 the symbol.
    async fn body(
        response: Response,
        lookup: Option<(&str, &Symbol)>,
    ) -> std::result::Result<String, TrackerError> {
        let status = response.status();
        let body = response.text().await.map_err(upstream)?;
        if status.is_success() {
            return Ok(body);
        }

        debug!(%status, body = %body, "Scrapper returned error");
        Err(match status {
            StatusCode::BAD_REQUEST => {
                TrackerError::invalid(lookup.map_or("", |(ticker, _)| ticker))
            }
            StatusCode::NOT_FOUND if lookup.is_some() => TrackerError::PriceNotFound {
                symbol: lookup.map_or_else(String::new, |(_, symbol)| symbol.to_string()),
            },
            StatusCode::INTERNAL_SERVER_ERROR => TrackerError::Storage(body),
            s if s.is_server_error() => TrackerError::UpstreamUnavailable(body),
            s => TrackerError::UpstreamUnavailable(format!("unexpected status {s}: {body}")),
        })
    }
}

fn upstream(err: impl std::fmt::Display) -> TrackerError {
    warn!(error = %err, "Scrapper unreachable");
    TrackerError::UpstreamUnavailable(err.to_string())
}

/// Split a comma separated list, dropping blanks.
fn split_list(body: &str) -> impl Iterator<Item = &str> {
    body.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[async_trait]
impl TrackerApi for ScrapperClient {
    fn quote_asset(&self) -> &QuoteAsset {
        &self.quote
    }

    async fn price(&self, ticker: &str, refresh: bool) -> std::result::Result<PriceQuote, TrackerError> {
        let symbol = self.normalize(ticker)?;
        let url = self.url(&format!("/price/{symbol}"));
        let response = self
            .http
            .send(|http| {
                http.get(&url)
                    .query(&[("refresh", if refresh { "true" } else { "false" })])
            })
            .await
            .map_err(upstream)?;

        let body = Self::body(response, Some((ticker, &symbol))).await?;
        let price: Price = body
            .parse()
            .map_err(|e| TrackerError::UpstreamUnavailable(format!("bad price from scrapper: {e}")))?;
        Ok(PriceQuote { symbol, price })
    }

    async fn add(&self, chat_id: ChatId, ticker: &str) -> std::result::Result<Symbol, TrackerError> {
        let symbol = self.normalize(ticker)?;
        let url = self.url(&format!("/watchlist/{chat_id}/add/{symbol}"));
        let response = self
            .http
            .send(|http| http.post(&url))
            .await
            .map_err(upstream)?;

        Self::body(response, Some((ticker, &symbol))).await?;
        Ok(symbol)
    }

    async fn remove(&self, chat_id: ChatId, ticker: &str) -> std::result::Result<bool, TrackerError> {
        let Ok(symbol) = self.normalize(ticker) else {
            return Ok(false);
        };
        let url = self.url(&format!("/watchlist/{chat_id}/remove/{symbol}"));
        let response = self
            .http
            .send(|http| http.delete(&url))
            .await
            .map_err(upstream)?;

        let body = Self::body(response, None).await?;
        Ok(body.trim().eq_ignore_ascii_case("true"))
    }

    async fn watchlist(&self, chat_id: ChatId) -> std::result::Result<Watchlist, TrackerError> {
        let url = self.url(&format!("/watchlist/{chat_id}"));
        let response = self
            .http
            .send(|http| http.get(&url))
            .await
            .map_err(upstream)?;

        let body = Self::body(response, None).await?;
        Ok(split_list(&body).map(Symbol::from).collect())
    }

    async fn chat_ids(&self) -> std::result::Result<BTreeSet<ChatId>, TrackerError> {
        let url = self.url("/watchlist/chatIds");
        let response = self
            .http
            .send(|http| http.get(&url))
            .await
            .map_err(upstream)?;

        let body = Self::body(response, None).await?;
        let mut ids = BTreeSet::new();
        for raw in split_list(&body) {
            match raw.parse::<ChatId>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(e) => warn!(value = raw, error = %e, "Skipping malformed chat id"),
            }
        }
        Ok(ids)
    }

    async fn pairs(&self, page: usize, size: usize) -> std::result::Result<Vec<Symbol>, TrackerError> {
        let url = self.url("/pairs");
        let response = self
            .http
            .send(|http| http.get(&url).query(&[("page", page), ("size", size)]))
            .await
            .map_err(upstream)?;

        let body = Self::body(response, None).await?;
        Ok(split_list(&body).map(Symbol::from).collect())
    }

    async fn pair_count(&self) -> std::result::Result<usize, TrackerError> {
        let url = self.url("/pairs/count");
        let response = self
            .http
            .send(|http| http.get(&url))
            .await
            .map_err(upstream)?;

        let body = Self::body(response, None).await?;
        body.trim()
            .parse()
            .map_err(|e| TrackerError::UpstreamUnavailable(format!("bad pair count from scrapper: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::http::HttpConfig;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        let items: Vec<_> = split_list("BTCUSDT, ETHUSDT,, ").collect();
        assert_eq!(items, vec!["BTCUSDT", "ETHUSDT"]);
        assert_eq!(split_list("").count(), 0);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let config = ScrapperConfig {
            base_url: "::nope".into(),
            ..ScrapperConfig::default()
        };
        assert!(ScrapperClient::from_config(&config, QuoteAsset::default()).is_err());
    }

    #[tokio::test]
    async fn malformed_ticker_never_reaches_the_wire() {
        let config = ScrapperConfig {
            base_url: "http://127.0.0.1:9/api/crypto".into(),
            http: HttpConfig {
                retry_max_attempts: 1,
                ..HttpConfig::default()
            },
        };
        let client = ScrapperClient::from_config(&config, QuoteAsset::default()).unwrap();

        assert_eq!(
            client.add(ChatId::new(1), "b/t/c").await.unwrap_err(),
            TrackerError::invalid("b/t/c")
        );
        assert!(!client.remove(ChatId::new(1), "b/t/c").await.unwrap());
    }

    #[tokio::test]
    async fn unreachable_scrapper_is_upstream_unavailable() {
        let config = ScrapperConfig {
            base_url: "http://127.0.0.1:9/api/crypto".into(),
            http: HttpConfig {
                retry_max_attempts: 1,
                connect_timeout_ms: 200,
                ..HttpConfig::default()
            },
        };
        let client = ScrapperClient::from_config(&config, QuoteAsset::default()).unwrap();

        let err = client.price("btc", false).await.unwrap_err();

        assert!(matches!(err, TrackerError::UpstreamUnavailable(_)));
    }
}
