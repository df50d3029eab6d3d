//! Exchange port for market data.
//!
//! The only integration point with the exchange: last price per symbol and
//! the list of symbols it trades.

use async_trait::async_trait;

use crate::domain::{Price, Symbol};
use crate::error::Result;

/// Market data source.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Fetch the last price for `symbol`.
    ///
    /// Returns `Ok(None)` when the exchange does not know the symbol and an
    /// error when the exchange cannot be reached.
    async fn fetch_price(&self, symbol: &Symbol) -> Result<Option<Price>>;

    /// Fetch every symbol currently trading on the exchange.
    async fn fetch_valid_pairs(&self) -> Result<Vec<String>>;

    /// Name for logs.
    fn name(&self) -> &'static str;
}
