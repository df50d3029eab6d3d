//! Tracker service: prices, watchlists and pair listing.
//!
//! Composes the pair registry, the price cache, the exchange gateway and the
//! watchlist store behind the [`TrackerApi`] port. Every failure comes back
//! as a [`TrackerError`]; nothing here panics on bad input.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::cache::price::PriceCache;
use super::pairs::PairRegistry;
use crate::domain::{ChatId, QuoteAsset, Symbol, Watchlist};
use crate::port::inbound::tracker::{PriceQuote, TrackerApi, TrackerError};
use crate::port::outbound::exchange::ExchangeGateway;
use crate::port::outbound::watchlist::WatchlistStore;

/// Largest page the REST API will serve.
pub const MAX_PAGE_SIZE: usize = 1000;

/// In-process implementation of [`TrackerApi`].
pub struct TrackerService {
    gateway: Arc<dyn ExchangeGateway>,
    store: Arc<dyn WatchlistStore>,
    pairs: Arc<PairRegistry>,
    cache: PriceCache,
}

impl TrackerService {
    /// Create a tracker over the given adapters.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn ExchangeGateway>,
        store: Arc<dyn WatchlistStore>,
        pairs: Arc<PairRegistry>,
        cache: PriceCache,
    ) -> Self {
        Self {
            gateway,
            store,
            pairs,
            cache,
        }
    }

    /// Normalize `raw` and check it against the valid pair set.
    fn validate(&self, raw: &str) -> Result<Symbol, TrackerError> {
        let symbol = Symbol::normalize(raw, self.pairs.quote()).map_err(|e| {
            debug!(ticker = raw, error = %e, "Rejected malformed ticker");
            TrackerError::invalid(raw)
        })?;

        if !self.pairs.contains(&symbol) {
            warn!(
                ticker = raw,
                symbol = %symbol,
                pairs = self.pairs.len(),
                "Ticker not found in valid trading pairs"
            );
            return Err(TrackerError::invalid(raw));
        }
        Ok(symbol)
    }
}

fn storage_error(err: crate::error::Error) -> TrackerError {
    TrackerError::Storage(err.to_string())
}

#[async_trait]
impl TrackerApi for TrackerService {
    fn quote_asset(&self) -> &QuoteAsset {
        self.pairs.quote()
    }

    async fn price(&self, ticker: &str, refresh: bool) -> Result<PriceQuote, TrackerError> {
        let symbol = self.validate(ticker)?;

        match self
            .cache
            .get_or_fetch(&symbol, refresh, self.gateway.as_ref())
            .await
        {
            Ok(Some(price)) => {
                debug!(symbol = %symbol, %price, "Price lookup");
                Ok(PriceQuote { symbol, price })
            }
            Ok(None) => {
                warn!(symbol = %symbol, "Exchange has no price for valid pair");
                Err(TrackerError::PriceNotFound {
                    symbol: symbol.into_inner(),
                })
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Exchange unavailable");
                Err(TrackerError::UpstreamUnavailable(e.to_string()))
            }
        }
    }

    async fn add(&self, chat_id: ChatId, ticker: &str) -> Result<Symbol, TrackerError> {
        let symbol = self.validate(ticker)?;
        let inserted = self
            .store
            .add(chat_id, &symbol)
            .await
            .map_err(storage_error)?;

        if inserted {
            info!(chat_id = %chat_id, symbol = %symbol, "Added to watchlist");
        } else {
            debug!(chat_id = %chat_id, symbol = %symbol, "Already in watchlist");
        }
        Ok(symbol)
    }

    async fn remove(&self, chat_id: ChatId, ticker: &str) -> Result<bool, TrackerError> {
        // Malformed input cannot match a stored entry.
        let Ok(symbol) = Symbol::normalize(ticker, self.pairs.quote()) else {
            return Ok(false);
        };

        let removed = self
            .store
            .remove(chat_id, &symbol)
            .await
            .map_err(storage_error)?;

        if removed {
            info!(chat_id = %chat_id, symbol = %symbol, "Removed from watchlist");
        } else {
            debug!(chat_id = %chat_id, symbol = %symbol, "Not in watchlist");
        }
        Ok(removed)
    }

    async fn watchlist(&self, chat_id: ChatId) -> Result<Watchlist, TrackerError> {
        self.store.list(chat_id).await.map_err(storage_error)
    }

    async fn chat_ids(&self) -> Result<BTreeSet<ChatId>, TrackerError> {
        self.store.chat_ids().await.map_err(storage_error)
    }

    async fn pairs(&self, page: usize, size: usize) -> Result<Vec<Symbol>, TrackerError> {
        Ok(self.pairs.snapshot().slice(page, size.min(MAX_PAGE_SIZE)))
    }

    async fn pair_count(&self) -> Result<usize, TrackerError> {
        Ok(self.pairs.len())
    }
}
