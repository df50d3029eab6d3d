//! Persistence port for watchlists.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{ChatId, Symbol, Watchlist};
use crate::error::Result;

/// Storage operations for watchlist entries.
///
/// Symbols are stored as given; validation and normalization happen before
/// the store is called. Implementations must make `add` and `remove` atomic
/// per `(chat_id, symbol)`.
#[async_trait]
pub trait WatchlistStore: Send + Sync {
    /// Insert an entry if absent. Returns true if a new entry was created.
    async fn add(&self, chat_id: ChatId, symbol: &Symbol) -> Result<bool>;

    /// Delete an entry. Returns true if an entry existed.
    async fn remove(&self, chat_id: ChatId, symbol: &Symbol) -> Result<bool>;

    /// All symbols of a chat.
    async fn list(&self, chat_id: ChatId) -> Result<Watchlist>;

    /// Distinct chats with at least one entry.
    async fn chat_ids(&self) -> Result<BTreeSet<ChatId>>;
}
