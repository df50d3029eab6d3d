//! SQLite persistence adapters using Diesel ORM.

pub mod database;
mod watchlist;

pub use watchlist::SqliteWatchlistStore;
