//! Thread-safe price cache with a fixed time-to-live.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Price, Symbol};
use crate::error::Result;
use crate::port::outbound::exchange::ExchangeGateway;

/// Default time a fetched price is served from memory.
pub const DEFAULT_PRICE_TTL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    price: Price,
    fetched_at: Instant,
}

/// Memoizes the last fetched price per symbol.
///
/// Two lookups of the same symbol within the TTL hit the exchange once.
/// Concurrent misses may both fetch; the later write wins.
pub struct PriceCache {
    ttl: Duration,
    entries: RwLock<HashMap<Symbol, CachedPrice>>,
}

impl PriceCache {
    /// Create a cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached price if present and younger than the TTL.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<Price> {
        let entries = self.entries.read();
        entries
            .get(symbol)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.price)
    }

    /// Store a freshly fetched price, dropping expired entries.
    pub fn insert(&self, symbol: Symbol, price: Price) {
        let ttl = self.ttl;
        let mut entries = self.entries.write();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < ttl);
        entries.insert(
            symbol,
            CachedPrice {
                price,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Serve from cache, or fetch from the gateway and remember the result.
    ///
    /// `refresh` skips the cached value but still stores the new one.
    /// Unknown symbols (`Ok(None)`) are not cached.
    ///
    /// # Errors
    /// Propagates gateway errors.
    pub async fn get_or_fetch(
        &self,
        symbol: &Symbol,
        refresh: bool,
        gateway: &dyn ExchangeGateway,
    ) -> Result<Option<Price>> {
        if !refresh {
            if let Some(price) = self.get(symbol) {
                debug!(symbol = %symbol, %price, "Price cache hit");
                return Ok(Some(price));
            }
        }

        let fetched = gateway.fetch_price(symbol).await?;
        if let Some(price) = fetched {
            debug!(symbol = %symbol, %price, refresh, "Price fetched");
            self.insert(symbol.clone(), price);
        }
        Ok(fetched)
    }

    /// Number of entries (fresh or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::exchange::ScriptedGateway;
    use rust_decimal_macros::dec;

    fn btc() -> Symbol {
        Symbol::new("BTCUSDT")
    }

    #[tokio::test]
    async fn second_lookup_within_ttl_hits_cache() {
        let gateway = ScriptedGateway::new().with_price("BTCUSDT", dec!(65000.01));
        let cache = PriceCache::new(Duration::from_secs(60));

        let first = cache.get_or_fetch(&btc(), false, &gateway).await.unwrap();
        let second = cache.get_or_fetch(&btc(), false, &gateway).await.unwrap();

        assert_eq!(first, Some(Price::new(dec!(65000.01))));
        assert_eq!(first, second);
        assert_eq!(gateway.price_calls(), 1);
    }

    #[tokio::test]
    async fn refresh_bypasses_cache() {
        let gateway = ScriptedGateway::new().with_price("BTCUSDT", dec!(1));
        let cache = PriceCache::new(Duration::from_secs(60));

        cache.get_or_fetch(&btc(), false, &gateway).await.unwrap();
        cache.get_or_fetch(&btc(), true, &gateway).await.unwrap();

        assert_eq!(gateway.price_calls(), 2);
    }

    #[tokio::test]
    async fn zero_ttl_always_fetches() {
        let gateway = ScriptedGateway::new().with_price("BTCUSDT", dec!(1));
        let cache = PriceCache::new(Duration::ZERO);

        cache.get_or_fetch(&btc(), false, &gateway).await.unwrap();
        cache.get_or_fetch(&btc(), false, &gateway).await.unwrap();

        assert_eq!(gateway.price_calls(), 2);
        assert!(cache.get(&btc()).is_none());
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_cached() {
        let gateway = ScriptedGateway::new();
        let cache = PriceCache::default();

        let price = cache.get_or_fetch(&btc(), false, &gateway).await.unwrap();

        assert!(price.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn gateway_error_propagates_and_leaves_cache_untouched() {
        let gateway = ScriptedGateway::new().unreachable();
        let cache = PriceCache::default();

        assert!(cache.get_or_fetch(&btc(), false, &gateway).await.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_purges_expired_entries() {
        let cache = PriceCache::new(Duration::ZERO);
        cache.insert(Symbol::new("AUSDT"), Price::new(dec!(1)));
        cache.insert(Symbol::new("BUSDT"), Price::new(dec!(2)));
        assert_eq!(cache.len(), 1);
    }
}
