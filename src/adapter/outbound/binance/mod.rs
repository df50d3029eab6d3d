//! Binance spot exchange adapter.

mod client;
pub mod dto;
mod settings;

pub use client::BinanceClient;
pub use settings::BinanceConfig;
