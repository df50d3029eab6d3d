//! Valid trading pair set and pagination over it.

use std::collections::BTreeSet;

use super::symbol::{QuoteAsset, Symbol};

/// Number of pairs shown per page in chat.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Set of tradable symbols quoted in a single asset.
///
/// Kept sorted so pagination is stable between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSet {
    symbols: BTreeSet<Symbol>,
}

impl PairSet {
    /// Build a pair set from exchange symbols, keeping only those quoted in
    /// `quote`. Input is uppercased.
    pub fn from_exchange<I, S>(symbols: I, quote: &QuoteAsset) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = symbols
            .into_iter()
            .map(|s| Symbol::new(s.as_ref().trim().to_ascii_uppercase()))
            .filter(|s| s.is_quoted_in(quote))
            .collect();
        Self { symbols }
    }

    /// Whether `symbol` is a valid pair.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Raw slice used by the REST API: out-of-range pages are empty.
    #[must_use]
    pub fn slice(&self, page: usize, size: usize) -> Vec<Symbol> {
        let Some(start) = page.checked_mul(size) else {
            return Vec::new();
        };
        self.symbols.iter().skip(start).take(size).cloned().collect()
    }
}

/// Number of pages needed for `len` items, `size` per page.
#[must_use]
pub fn page_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    len.div_ceil(size)
}

/// Reset any page outside `0..total_pages` to the first page.
#[must_use]
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    match usize::try_from(requested) {
        Ok(index) if index < total_pages => index,
        _ => 0,
    }
}
