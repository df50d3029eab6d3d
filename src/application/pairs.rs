//! Registry of valid trading pairs, loaded from the exchange.
//!
//! The set is replaced wholesale on every successful refresh, so readers
//! always see a complete snapshot. A failed refresh keeps the previous set.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::{PairSet, QuoteAsset, Symbol};
use crate::error::Result;
use crate::port::outbound::exchange::ExchangeGateway;

/// Shared, refreshable [`PairSet`].
pub struct PairRegistry {
    quote: QuoteAsset,
    pairs: RwLock<Arc<PairSet>>,
}

impl PairRegistry {
    /// Create an empty registry for pairs quoted in `quote`.
    #[must_use]
    pub fn new(quote: QuoteAsset) -> Self {
        Self {
            quote,
            pairs: RwLock::new(Arc::new(PairSet::default())),
        }
    }

    /// Create a registry pre-loaded with `symbols`.
    #[must_use]
    pub fn with_pairs<I, S>(quote: QuoteAsset, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = Self::new(quote);
        registry.replace(PairSet::from_exchange(symbols, &registry.quote));
        registry
    }

    /// Quote asset of every pair in the registry.
    #[must_use]
    pub fn quote(&self) -> &QuoteAsset {
        &self.quote
    }

    /// Reload pairs from the exchange. Returns the new pair count.
    ///
    /// # Errors
    /// Returns the gateway error; the previous set stays in place.
    pub async fn refresh(&self, gateway: &dyn ExchangeGateway) -> Result<usize> {
        let symbols = gateway.fetch_valid_pairs().await?;
        let set = PairSet::from_exchange(symbols, &self.quote);
        let count = set.len();
        self.replace(set);
        info!(
            exchange = gateway.name(),
            quote = %self.quote,
            count,
            "Loaded valid trading pairs"
        );
        Ok(count)
    }

    fn replace(&self, set: PairSet) {
        *self.pairs.write() = Arc::new(set);
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<PairSet> {
        Arc::clone(&self.pairs.read())
    }

    /// Whether `symbol` is currently a valid pair.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.pairs.read().contains(symbol)
    }

    /// Number of valid pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.read().len()
    }

    /// True until the first successful load.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Refresh cadence for [`spawn_refresher`].
#[derive(Debug, Clone, Copy)]
pub struct RefreshSchedule {
    /// Delay between refreshes once pairs are loaded.
    pub interval: Duration,
    /// Delay between attempts while the registry is still empty.
    pub retry_interval: Duration,
}

impl RefreshSchedule {
    fn next_delay(&self, registry: &PairRegistry) -> Duration {
        if registry.is_empty() {
            self.retry_interval
        } else {
            self.interval
        }
    }
}

/// Spawn a task that keeps the registry fresh until `shutdown` flips.
///
/// While the registry is empty (failed initial load) it retries on the
/// short interval; afterwards it reloads on the long one.
pub fn spawn_refresher(
    registry: Arc<PairRegistry>,
    gateway: Arc<dyn ExchangeGateway>,
    schedule: RefreshSchedule,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            interval_secs = schedule.interval.as_secs(),
            retry_secs = schedule.retry_interval.as_secs(),
            "Pair refresher started"
        );
        loop {
            let delay = schedule.next_delay(&registry);
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => break,
            }

            if let Err(e) = registry.refresh(gateway.as_ref()).await {
                warn!(
                    error = %e,
                    pairs = registry.len(),
                    "Failed to refresh trading pairs, keeping previous set"
                );
            }
        }
        info!("Pair refresher stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::exchange::ScriptedGateway;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn refresh_loads_only_quoted_pairs() {
        let gateway = ScriptedGateway::new()
            .with_price("BTCUSDT", dec!(1))
            .with_pairs(["ETHUSDT", "ETHBTC"]);
        let registry = PairRegistry::new(QuoteAsset::default());

        let count = registry.refresh(&gateway).await.unwrap();

        assert_eq!(count, 2);
        assert!(registry.contains(&Symbol::new("ETHUSDT")));
        assert!(!registry.contains(&Symbol::new("ETHBTC")));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_set() {
        let gateway = ScriptedGateway::new().with_pairs(["BTCUSDT"]);
        let registry = PairRegistry::new(QuoteAsset::default());
        registry.refresh(&gateway).await.unwrap();

        gateway.set_unreachable(true);
        assert!(registry.refresh(&gateway).await.is_err());

        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn failed_initial_load_leaves_registry_empty() {
        let gateway = ScriptedGateway::new().with_pairs(["BTCUSDT"]).unreachable();
        let registry = PairRegistry::new(QuoteAsset::default());

        assert!(registry.refresh(&gateway).await.is_err());
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn refresher_retries_until_first_load_succeeds() {
        let gateway = ScriptedGateway::new().with_pairs(["BTCUSDT"]).unreachable();
        let registry = Arc::new(PairRegistry::new(QuoteAsset::default()));
        let (tx, rx) = watch::channel(false);
        let schedule = RefreshSchedule {
            interval: Duration::from_secs(3600),
            retry_interval: Duration::from_secs(5),
        };

        let handle = spawn_refresher(
            Arc::clone(&registry),
            Arc::new(gateway.clone()),
            schedule,
            rx,
        );

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(gateway.pair_calls(), 2);
        assert!(registry.is_empty());

        gateway.set_unreachable(false);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(registry.len(), 1);

        // Loaded: next attempt waits for the long interval.
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.pair_calls(), 3);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[test]
    fn with_pairs_preloads() {
        let registry = PairRegistry::with_pairs(QuoteAsset::default(), ["BTCUSDT", "ETHUSDT"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.snapshot().slice(0, 1), vec![Symbol::new("BTCUSDT")]);
    }
}
