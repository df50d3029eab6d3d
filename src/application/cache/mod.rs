//! Runtime caches used by application services.
//!
//! - [`price::PriceCache`]: last price per symbol with a fixed TTL

pub mod price;
