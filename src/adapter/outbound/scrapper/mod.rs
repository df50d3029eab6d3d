//! Remote tracker: the scrapper REST API seen through [`TrackerApi`].
//!
//! [`TrackerApi`]: crate::port::inbound::tracker::TrackerApi

mod client;
mod settings;

pub use client::ScrapperClient;
pub use settings::ScrapperConfig;
