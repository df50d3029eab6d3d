//! SQLite watchlist store.

use std::collections::BTreeSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::database::connection::DbPool;
use super::database::model::WatchlistRow;
use super::database::schema::watchlist;
use crate::domain::{ChatId, Symbol, Watchlist, WatchlistEntry};
use crate::error::{Error, Result};
use crate::port::outbound::watchlist::WatchlistStore;

/// SQLite-backed watchlist store.
///
/// Uniqueness of `(chat_id, ticker)` is enforced by the primary key, so
/// concurrent adds of the same entry cannot duplicate it.
pub struct SqliteWatchlistStore {
    pool: DbPool,
}

impl SqliteWatchlistStore {
    /// Create a store over an already migrated pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `f` on a pooled connection off the async workers.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            f(&mut conn)
        })
        .await?
    }
}

fn db_error(e: diesel::result::Error) -> Error {
    Error::Database(e.to_string())
}

#[async_trait]
impl WatchlistStore for SqliteWatchlistStore {
    async fn add(&self, chat_id: ChatId, symbol: &Symbol) -> Result<bool> {
        let row = WatchlistRow::from(&WatchlistEntry::new(chat_id, symbol.clone()));
        self.with_conn(move |conn| {
            let inserted = diesel::insert_or_ignore_into(watchlist::table)
                .values(&row)
                .execute(conn)
                .map_err(db_error)?;
            Ok(inserted > 0)
        })
        .await
    }

    async fn remove(&self, chat_id: ChatId, symbol: &Symbol) -> Result<bool> {
        let ticker = symbol.as_str().to_string();
        self.with_conn(move |conn| {
            let deleted = diesel::delete(
                watchlist::table
                    .filter(watchlist::chat_id.eq(chat_id.get()))
                    .filter(watchlist::ticker.eq(ticker)),
            )
            .execute(conn)
            .map_err(db_error)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list(&self, chat_id: ChatId) -> Result<Watchlist> {
        self.with_conn(move |conn| {
            let tickers: Vec<String> = watchlist::table
                .filter(watchlist::chat_id.eq(chat_id.get()))
                .select(watchlist::ticker)
                .load(conn)
                .map_err(db_error)?;
            Ok(tickers.into_iter().map(Symbol::new).collect())
        })
        .await
    }

    async fn chat_ids(&self) -> Result<BTreeSet<ChatId>> {
        self.with_conn(|conn| {
            let ids: Vec<i64> = watchlist::table
                .select(watchlist::chat_id)
                .distinct()
                .load(conn)
                .map_err(db_error)?;
            Ok(ids.into_iter().map(ChatId::new).collect())
        })
        .await
    }
}
