//! Routes chat messages and button callbacks to command handlers.

use std::sync::Arc;

use tracing::debug;

use super::command::{
    AddHandler, CommandHandler, ListHandler, PairsHandler, PriceHandler, RemoveHandler, Reply,
    StartHandler,
};
use super::messages;
use crate::domain::ChatId;
use crate::port::inbound::tracker::TrackerApi;

/// Callback data prefix of the pagination buttons.
pub const PAGE_CALLBACK_PREFIX: &str = "pairs_page_";

/// Callback data for a button that opens zero-based `page`.
#[must_use]
pub fn page_callback_data(page: usize) -> String {
    format!("{PAGE_CALLBACK_PREFIX}{page}")
}

/// Page index carried by callback `data`, if it is a pagination callback.
#[must_use]
pub fn parse_page_callback(data: &str) -> Option<i64> {
    data.strip_prefix(PAGE_CALLBACK_PREFIX)?.parse().ok()
}

/// Stateless dispatcher over the registered handlers.
pub struct CommandRouter {
    handlers: Vec<Box<dyn CommandHandler>>,
    pairs: PairsHandler,
}

impl CommandRouter {
    /// Router with every chat command wired to `tracker`.
    pub fn new(tracker: Arc<dyn TrackerApi>) -> Self {
        let handlers: Vec<Box<dyn CommandHandler>> = vec![
            Box::new(StartHandler),
            Box::new(PriceHandler::new(Arc::clone(&tracker))),
            Box::new(AddHandler::new(Arc::clone(&tracker))),
            Box::new(RemoveHandler::new(Arc::clone(&tracker))),
            Box::new(ListHandler::new(Arc::clone(&tracker))),
            Box::new(PairsHandler::new(Arc::clone(&tracker))),
        ];
        Self {
            handlers,
            pairs: PairsHandler::new(tracker),
        }
    }

    /// Reply to a text message.
    pub async fn route(&self, chat_id: ChatId, text: &str) -> Reply {
        let text = text.trim().to_lowercase();
        match self.handlers.iter().find(|h| h.can_handle(&text)) {
            Some(handler) => {
                debug!(chat_id = %chat_id, command = handler.command(), "Handling command");
                handler.handle(chat_id, &text).await
            }
            None => {
                debug!(chat_id = %chat_id, "Unknown command");
                Reply::text(messages::UNKNOWN_COMMAND)
            }
        }
    }

    /// Reply to a button callback. `None` for data this router does not own.
    pub async fn callback(&self, chat_id: ChatId, data: &str) -> Option<Reply> {
        let page = parse_page_callback(data)?;
        debug!(chat_id = %chat_id, page, "Handling pagination callback");
        Some(self.pairs.page(page).await)
    }

    /// `(command, description)` pairs for the "/" menu, without the slash.
    pub fn menu(&self) -> Vec<(&'static str, &'static str)> {
        self.handlers
            .iter()
            .map(|h| (h.command().trim_start_matches('/'), h.description()))
            .collect()
    }
}
