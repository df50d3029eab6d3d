//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors that validate raw input, such
//! as [`Symbol::normalize`](super::symbol::Symbol::normalize).
//!
//! # Examples
//!
//! ```
//! use tickerbot::domain::error::DomainError;
//! use tickerbot::domain::symbol::{QuoteAsset, Symbol};
//!
//! let result = Symbol::normalize("  ", &QuoteAsset::default());
//! assert!(matches!(result, Err(DomainError::EmptyTicker)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The ticker was empty after trimming.
    #[error("ticker cannot be empty")]
    EmptyTicker,

    /// The ticker contains characters that cannot appear in a trading pair.
    #[error("ticker '{ticker}' contains invalid characters")]
    MalformedTicker {
        /// The raw ticker that was provided.
        ticker: String,
    },

    /// The quote asset was empty or not alphanumeric.
    #[error("invalid quote asset '{0}'")]
    InvalidQuoteAsset(String),

    /// A price string could not be parsed as a decimal.
    #[error("invalid price '{0}'")]
    InvalidPrice(String),
}
