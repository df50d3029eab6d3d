//! User-facing reply texts.

use crate::domain::{Price, Symbol};
use crate::port::inbound::tracker::TrackerError;

pub const START: &str = "👋 Hi! I track crypto prices on Binance.\n\n\
    /price <ticker> - 💰 Current price, e.g. /price btc\n\
    /add <ticker> - ➕ Add a pair to your watchlist\n\
    /remove <ticker> - ➖ Remove a pair from your watchlist\n\
    /list - 📋 Your watchlist\n\
    /pairs [page] - 📚 Available trading pairs\n\n\
    I'll also send you your watchlist prices periodically.";

pub const UNKNOWN_COMMAND: &str = "🤷 Unknown command. Send /start to see what I can do.";

pub const PRICE_USAGE: &str = "Usage: /price <ticker>, e.g. /price btc";
pub const ADD_USAGE: &str = "Usage: /add <ticker>, e.g. /add eth";

pub const LIST_EMPTY: &str = "📋 Your watchlist is empty. Add pairs with /add <ticker>.";
pub const PAIRS_EMPTY: &str = "📚 No trading pairs available right now.";

pub const UNAVAILABLE: &str = "⚠️ The price service is unavailable right now. Try again later.";
pub const STORAGE_FAILURE: &str = "⚠️ Something went wrong. Try again later.";

pub fn price_success(symbol: &Symbol, price: &Price) -> String {
    format!("💰 {symbol}: ${price}")
}

pub fn add_success(symbol: &Symbol) -> String {
    format!("✅ {symbol} added to your watchlist.")
}

pub fn remove_success(ticker: &str) -> String {
    format!("🗑️ {} removed from your watchlist.", ticker.to_uppercase())
}

pub fn remove_not_found(ticker: &str) -> String {
    if ticker.is_empty() {
        "Usage: /remove <ticker>, e.g. /remove btc".to_string()
    } else {
        format!("{} is not in your watchlist.", ticker.to_uppercase())
    }
}

pub fn list_success(symbols: &str) -> String {
    format!("📋 Your watchlist: {symbols}")
}

pub fn pairs_header(page: usize, total_pages: usize) -> String {
    format!("📚 Trading pairs (page {page}/{total_pages}):\n")
}

/// Reply text for a failed tracker call.
pub fn tracker_error(err: &TrackerError) -> String {
    match err {
        TrackerError::InvalidTicker { ticker } => format!(
            "❌ Unknown ticker: {}. Use /pairs to see available pairs.",
            ticker.trim().to_uppercase()
        ),
        TrackerError::PriceNotFound { symbol } => {
            format!("❌ No price available for {symbol} right now.")
        }
        TrackerError::UpstreamUnavailable(_) => UNAVAILABLE.to_string(),
        TrackerError::Storage(_) => STORAGE_FAILURE.to_string(),
    }
}
