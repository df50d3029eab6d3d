//! Tickerbot - crypto prices and per-chat watchlists over Telegram.
//!
//! Two cooperating services built from one crate:
//!
//! - the **scrapper**, a REST API over the Binance public market data API
//!   that validates tickers against the live pair list, caches prices and
//!   stores watchlists;
//! - the **bot**, a Telegram front end that parses chat commands, renders
//!   replies and keyboards, and pushes scheduled watchlist summaries.
//!
//! Both can also run in one process (`standalone`), in which case the bot
//! talks to the tracker directly instead of over HTTP.
//!
//! # Architecture
//!
//! - [`domain`] - Symbols, prices, chat ids, watchlists and pair pages
//! - [`port`] - Traits at the edges: [`port::inbound::tracker::TrackerApi`]
//!   plus the exchange, watchlist store and messenger ports
//! - [`application`] - Tracker service, pair registry, price cache and
//!   notification scheduler
//! - [`adapter`] - Binance, scrapper and Telegram clients, SQLite and
//!   in-memory stores, the axum API and the chat command router
//! - [`infrastructure`] - Configuration and runtime wiring
//!
//! # Features
//!
//! - `telegram` (default) - teloxide bot and Telegram delivery
//! - `testkit` - scripted test doubles for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
