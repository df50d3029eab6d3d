//! Trading pair symbols and their normalization rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Quote asset every tracked pair is priced in (e.g. `USDT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct QuoteAsset(String);

impl QuoteAsset {
    /// Create a quote asset, uppercasing the input.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidQuoteAsset`] if the value is empty or
    /// not ASCII alphanumeric.
    pub fn new(asset: impl Into<String>) -> Result<Self, DomainError> {
        let asset = asset.into().trim().to_ascii_uppercase();
        if asset.is_empty() || !asset.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidQuoteAsset(asset));
        }
        Ok(Self(asset))
    }

    /// Get the quote asset as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QuoteAsset {
    fn default() -> Self {
        Self("USDT".to_string())
    }
}

impl TryFrom<String> for QuoteAsset {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for QuoteAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized trading pair symbol, e.g. `BTCUSDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Wrap an already-normalized symbol (as stored or as reported by the
    /// exchange).
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    /// Normalize raw user input into a pair symbol.
    ///
    /// Trims, uppercases, and appends the quote asset unless the input
    /// already ends with it: `btc` and `BTCUSDT` both become `BTCUSDT`.
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyTicker`] for blank input and
    /// [`DomainError::MalformedTicker`] for non-alphanumeric input.
    pub fn normalize(raw: &str, quote: &QuoteAsset) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTicker);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::MalformedTicker {
                ticker: trimmed.to_string(),
            });
        }

        let upper = trimmed.to_ascii_uppercase();
        if upper.ends_with(quote.as_str()) {
            Ok(Self(upper))
        } else {
            Ok(Self(format!("{upper}{quote}")))
        }
    }

    /// True when the symbol is quoted in `quote`.
    #[must_use]
    pub fn is_quoted_in(&self, quote: &QuoteAsset) -> bool {
        self.0.len() > quote.as_str().len() && self.0.ends_with(quote.as_str())
    }

    /// Get the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the symbol, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
