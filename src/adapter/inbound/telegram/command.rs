//! Chat command handlers.
//!
//! Each handler owns one command. Handlers never fail: tracker errors are
//! turned into reply text here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::messages;
use crate::domain::pairs::{clamp_page, page_count};
use crate::domain::watchlist::join_symbols;
use crate::domain::{ChatId, Symbol, DEFAULT_PAGE_SIZE};
use crate::port::inbound::tracker::TrackerApi;

/// Pagination state of a `/pairs` reply, used to render inline buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page shown.
    pub page: usize,
    pub total_pages: usize,
}

impl Pagination {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Reply produced by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub pagination: Option<Pagination>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pagination: None,
        }
    }
}

/// Command token of a message: the first word with any `@botname` suffix
/// removed. `None` unless it starts with `/`.
pub fn command_token(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    if !first.starts_with('/') {
        return None;
    }
    Some(first.split_once('@').map_or(first, |(head, _)| head))
}

/// First argument after the command token.
fn argument(text: &str) -> Option<&str> {
    text.split_whitespace().nth(1)
}

/// A single chat command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command this handler owns, e.g. `/price`.
    fn command(&self) -> &'static str;

    /// Short description for the Telegram "/" menu.
    fn description(&self) -> &'static str;

    /// Whether this handler owns `text`.
    fn can_handle(&self, text: &str) -> bool {
        command_token(text) == Some(self.command())
    }

    /// Build the reply for `text` sent in `chat_id`.
    async fn handle(&self, chat_id: ChatId, text: &str) -> Reply;
}

pub struct StartHandler;

#[async_trait]
impl CommandHandler for StartHandler {
    fn command(&self) -> &'static str {
        "/start"
    }

    fn description(&self) -> &'static str {
        "Show available commands"
    }

    async fn handle(&self, _chat_id: ChatId, _text: &str) -> Reply {
        Reply::text(messages::START)
    }
}

pub struct PriceHandler {
    tracker: Arc<dyn TrackerApi>,
}

impl PriceHandler {
    pub fn new(tracker: Arc<dyn TrackerApi>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl CommandHandler for PriceHandler {
    fn command(&self) -> &'static str {
        "/price"
    }

    fn description(&self) -> &'static str {
        "Current price of a pair"
    }

    async fn handle(&self, _chat_id: ChatId, text: &str) -> Reply {
        let Some(ticker) = argument(text) else {
            return Reply::text(messages::PRICE_USAGE);
        };
        match self.tracker.price(ticker, false).await {
            Ok(quote) => Reply::text(messages::price_success(&quote.symbol, &quote.price)),
            Err(e) => {
                debug!(ticker, error = %e, "Price command failed");
                Reply::text(messages::tracker_error(&e))
            }
        }
    }
}

pub struct AddHandler {
    tracker: Arc<dyn TrackerApi>,
}

impl AddHandler {
    pub fn new(tracker: Arc<dyn TrackerApi>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl CommandHandler for AddHandler {
    fn command(&self) -> &'static str {
        "/add"
    }

    fn description(&self) -> &'static str {
        "Add a pair to your watchlist"
    }

    async fn handle(&self, chat_id: ChatId, text: &str) -> Reply {
        let Some(ticker) = argument(text) else {
            return Reply::text(messages::ADD_USAGE);
        };
        match self.tracker.add(chat_id, ticker).await {
            Ok(symbol) => Reply::text(messages::add_success(&symbol)),
            Err(e) => {
                debug!(chat_id = %chat_id, ticker, error = %e, "Add command failed");
                Reply::text(messages::tracker_error(&e))
            }
        }
    }
}

pub struct RemoveHandler {
    tracker: Arc<dyn TrackerApi>,
}

impl RemoveHandler {
    pub fn new(tracker: Arc<dyn TrackerApi>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl CommandHandler for RemoveHandler {
    fn command(&self) -> &'static str {
        "/remove"
    }

    fn description(&self) -> &'static str {
        "Remove a pair from your watchlist"
    }

    async fn handle(&self, chat_id: ChatId, text: &str) -> Reply {
        let Some(ticker) = argument(text) else {
            return Reply::text(messages::remove_not_found(""));
        };
        let shown = Symbol::normalize(ticker, self.tracker.quote_asset())
            .map_or_else(|_| ticker.to_string(), Symbol::into_inner);
        match self.tracker.remove(chat_id, ticker).await {
            Ok(true) => Reply::text(messages::remove_success(&shown)),
            Ok(false) => Reply::text(messages::remove_not_found(&shown)),
            Err(e) => {
                warn!(chat_id = %chat_id, ticker, error = %e, "Remove command failed");
                Reply::text(messages::tracker_error(&e))
            }
        }
    }
}

pub struct ListHandler {
    tracker: Arc<dyn TrackerApi>,
}

impl ListHandler {
    pub fn new(tracker: Arc<dyn TrackerApi>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl CommandHandler for ListHandler {
    fn command(&self) -> &'static str {
        "/list"
    }

    fn description(&self) -> &'static str {
        "Show your watchlist"
    }

    async fn handle(&self, chat_id: ChatId, _text: &str) -> Reply {
        match self.tracker.watchlist(chat_id).await {
            Ok(list) if list.is_empty() => Reply::text(messages::LIST_EMPTY),
            Ok(list) => Reply::text(messages::list_success(&join_symbols(&list))),
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "List command failed");
                Reply::text(messages::tracker_error(&e))
            }
        }
    }
}

pub struct PairsHandler {
    tracker: Arc<dyn TrackerApi>,
    page_size: usize,
}

impl PairsHandler {
    pub fn new(tracker: Arc<dyn TrackerApi>) -> Self {
        Self {
            tracker,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Render zero-based page `requested`, clamping it into range.
    pub async fn page(&self, requested: i64) -> Reply {
        let total = match self.tracker.pair_count().await {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "Failed to count pairs");
                return Reply::text(messages::tracker_error(&e));
            }
        };
        let total_pages = page_count(total, self.page_size);
        if total_pages == 0 {
            return Reply::text(messages::PAIRS_EMPTY);
        }

        let page = clamp_page(requested, total_pages);
        let items = match self.tracker.pairs(page, self.page_size).await {
            Ok(items) if items.is_empty() => return Reply::text(messages::PAIRS_EMPTY),
            Ok(items) => items,
            Err(e) => {
                warn!(page, error = %e, "Failed to list pairs");
                return Reply::text(messages::tracker_error(&e));
            }
        };

        let mut text = messages::pairs_header(page + 1, total_pages);
        let offset = page * self.page_size;
        for (i, symbol) in items.iter().enumerate() {
            text.push_str(&format!("{}. {symbol}\n", offset + i + 1));
        }

        Reply {
            text: text.trim_end().to_string(),
            pagination: Some(Pagination { page, total_pages }),
        }
    }
}

/// Zero-based page from the user's 1-based argument. Anything that is not
/// a number means the first page.
fn requested_page(text: &str) -> i64 {
    argument(text)
        .and_then(|raw| raw.parse::<i64>().ok())
        .map_or(0, |page| page.saturating_sub(1))
}

#[async_trait]
impl CommandHandler for PairsHandler {
    fn command(&self) -> &'static str {
        "/pairs"
    }

    fn description(&self) -> &'static str {
        "Browse available trading pairs"
    }

    async fn handle(&self, _chat_id: ChatId, text: &str) -> Reply {
        self.page(requested_page(text)).await
    }
}
