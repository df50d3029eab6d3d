//! In-memory outbound adapters.
//!
//! Useful for local runs without a database file and for tests. State is
//! lost on restart.

mod watchlist;

pub use watchlist::InMemoryWatchlistStore;
