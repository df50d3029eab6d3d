//! Outbound adapters (driven side).

pub mod binance;
pub mod http;
pub mod memory;
pub mod scrapper;
pub mod sqlite;
#[cfg(feature = "telegram")]
pub mod telegram;
