//! Tracker port: the operations behind both the chat commands and the REST
//! API.
//!
//! Implemented in-process by `application::tracker::TrackerService` and
//! remotely by `adapter::outbound::scrapper::ScrapperClient`, so the command
//! router does not care where the tracker runs.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChatId, Price, QuoteAsset, Symbol, Watchlist};

/// Failure of a tracker operation.
///
/// A missing watchlist entry is not an error: `remove` returns `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The ticker is malformed or not a valid pair on the exchange.
    #[error("invalid ticker: {ticker}")]
    InvalidTicker {
        /// The ticker as supplied by the user.
        ticker: String,
    },

    /// The exchange (or the remote scrapper) could not be reached.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The exchange no longer knows a symbol that passed validation.
    #[error("price not found for {symbol}")]
    PriceNotFound {
        /// The normalized symbol.
        symbol: String,
    },

    /// The watchlist store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl TrackerError {
    /// Build an [`TrackerError::InvalidTicker`] from raw input.
    pub fn invalid(ticker: impl Into<String>) -> Self {
        Self::InvalidTicker {
            ticker: ticker.into(),
        }
    }
}

/// Result of a successful price lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    /// Normalized symbol the price belongs to.
    pub symbol: Symbol,
    /// Last traded price.
    pub price: Price,
}

/// Operations exposed to inbound adapters.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    /// Quote asset appended to bare tickers.
    fn quote_asset(&self) -> &QuoteAsset;

    /// Current price of `ticker`. `refresh` bypasses the price cache.
    async fn price(&self, ticker: &str, refresh: bool) -> Result<PriceQuote, TrackerError>;

    /// Add `ticker` to the chat's watchlist. Idempotent. Returns the
    /// normalized symbol.
    async fn add(&self, chat_id: ChatId, ticker: &str) -> Result<Symbol, TrackerError>;

    /// Remove `ticker` from the chat's watchlist. Returns whether an entry
    /// was removed.
    async fn remove(&self, chat_id: ChatId, ticker: &str) -> Result<bool, TrackerError>;

    /// Symbols watched by the chat (empty if none).
    async fn watchlist(&self, chat_id: ChatId) -> Result<Watchlist, TrackerError>;

    /// Chats that have at least one watchlist entry.
    async fn chat_ids(&self) -> Result<BTreeSet<ChatId>, TrackerError>;

    /// Raw page of valid pairs; empty when `page` is out of range.
    async fn pairs(&self, page: usize, size: usize) -> Result<Vec<Symbol>, TrackerError>;

    /// Total number of valid pairs.
    async fn pair_count(&self) -> Result<usize, TrackerError>;
}
