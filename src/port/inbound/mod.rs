//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`tracker`]: price lookups, watchlist management and pair listing,
//!   driven by the Telegram router and the HTTP API.

pub mod tracker;
