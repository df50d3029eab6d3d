//! Exchange-agnostic domain types.

pub mod error;
pub mod id;
pub mod money;
pub mod pairs;
pub mod symbol;
pub mod watchlist;

pub use id::ChatId;
pub use money::Price;
pub use pairs::{PairSet, DEFAULT_PAGE_SIZE};
pub use symbol::{QuoteAsset, Symbol};
pub use watchlist::{Watchlist, WatchlistEntry};
