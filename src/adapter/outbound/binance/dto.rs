//! Binance REST payloads.

use serde::Deserialize;

/// Binance error code for an unknown symbol.
pub const INVALID_SYMBOL: i64 = -1121;

/// `GET /api/v3/ticker/price?symbol=...`
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    /// Decimal string, e.g. `"65000.01000000"`.
    pub price: String,
}

/// `GET /api/v3/exchangeInfo` (only the fields we read).
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub status: String,
}

impl SymbolInfo {
    #[must_use]
    pub fn is_trading(&self) -> bool {
        self.status == "TRADING"
    }
}

/// Error body, e.g. `{"code":-1121,"msg":"Invalid symbol."}`.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub msg: String,
}
