//! Scripted [`ExchangeGateway`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::domain::{Price, Symbol};
use crate::error::{Error, Result};
use crate::port::outbound::exchange::ExchangeGateway;

/// In-memory exchange: known prices, a pair list and an outage switch.
///
/// Clones share state, so a test can keep a handle after moving the
/// gateway into a service.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    prices: Arc<RwLock<HashMap<String, Price>>>,
    pairs: Arc<RwLock<Vec<String>>>,
    unreachable: Arc<AtomicBool>,
    price_calls: Arc<AtomicU32>,
    pair_calls: Arc<AtomicU32>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known price for `symbol`. Also lists `symbol` as a trading pair.
    #[must_use]
    pub fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.set_price(symbol, price);
        self.pairs.write().push(symbol.to_string());
        self
    }

    /// Extra trading pairs without prices.
    #[must_use]
    pub fn with_pairs<I, S>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pairs.write().extend(pairs.into_iter().map(Into::into));
        self
    }

    /// Start in outage mode: every call fails.
    #[must_use]
    pub fn unreachable(self) -> Self {
        self.set_unreachable(true);
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.prices
            .write()
            .insert(symbol.to_string(), Price::new(price));
    }

    pub fn price_calls(&self) -> u32 {
        self.price_calls.load(Ordering::SeqCst)
    }

    pub fn pair_calls(&self) -> u32 {
        self.pair_calls.load(Ordering::SeqCst)
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::Connection("scripted exchange outage".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExchangeGateway for ScriptedGateway {
    async fn fetch_price(&self, symbol: &Symbol) -> Result<Option<Price>> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(self.prices.read().get(symbol.as_str()).copied())
    }

    async fn fetch_valid_pairs(&self) -> Result<Vec<String>> {
        self.pair_calls.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(self.pairs.read().clone())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
