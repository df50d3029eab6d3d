//! Watchlist entries.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::id::ChatId;
use super::symbol::Symbol;

/// Set of symbols watched by one chat.
pub type Watchlist = BTreeSet<Symbol>;

/// A single `(chat, symbol)` pair. Unique per chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    /// Chat that owns the entry.
    pub chat_id: ChatId,
    /// Normalized symbol.
    pub symbol: Symbol,
    /// When the entry was added.
    pub created_at: DateTime<Utc>,
}

impl WatchlistEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(chat_id: ChatId, symbol: Symbol) -> Self {
        Self {
            chat_id,
            symbol,
            created_at: Utc::now(),
        }
    }
}

/// Join symbols the way the REST API and chat replies render them.
#[must_use]
pub fn join_symbols(watchlist: &Watchlist) -> String {
    watchlist
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
