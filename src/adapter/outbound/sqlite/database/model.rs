//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::watchlist;
use crate::domain::WatchlistEntry;

/// Database row for a watchlist entry.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = watchlist)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatchlistRow {
    pub chat_id: i64,
    pub ticker: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl From<&WatchlistEntry> for WatchlistRow {
    fn from(entry: &WatchlistEntry) -> Self {
        Self {
            chat_id: entry.chat_id.get(),
            ticker: entry.symbol.as_str().to_string(),
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}
