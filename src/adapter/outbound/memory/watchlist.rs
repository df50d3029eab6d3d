//! In-memory watchlist store.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{ChatId, Symbol, Watchlist};
use crate::error::Result;
use crate::port::outbound::watchlist::WatchlistStore;

/// Watchlists kept in a map behind a single lock.
///
/// Chats whose last entry is removed are dropped from the map, so
/// `chat_ids` only reports chats with non-empty watchlists.
#[derive(Default)]
pub struct InMemoryWatchlistStore {
    entries: RwLock<HashMap<ChatId, Watchlist>>,
}

impl InMemoryWatchlistStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WatchlistStore for InMemoryWatchlistStore {
    async fn add(&self, chat_id: ChatId, symbol: &Symbol) -> Result<bool> {
        Ok(self
            .entries
            .write()
            .entry(chat_id)
            .or_default()
            .insert(symbol.clone()))
    }

    async fn remove(&self, chat_id: ChatId, symbol: &Symbol) -> Result<bool> {
        let mut entries = self.entries.write();
        let Some(list) = entries.get_mut(&chat_id) else {
            return Ok(false);
        };
        let removed = list.remove(symbol);
        if list.is_empty() {
            entries.remove(&chat_id);
        }
        Ok(removed)
    }

    async fn list(&self, chat_id: ChatId) -> Result<Watchlist> {
        Ok(self
            .entries
            .read()
            .get(&chat_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn chat_ids(&self) -> Result<BTreeSet<ChatId>> {
        Ok(self.entries.read().keys().copied().collect())
    }
}
