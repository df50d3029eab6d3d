//! Recording [`Messenger`] for tests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::ChatId;
use crate::error::{Error, Result};
use crate::port::outbound::messenger::Messenger;

/// Collects every delivered message; fails for chats marked as broken.
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    sent: Arc<Mutex<Vec<(ChatId, String)>>>,
    failing: Arc<Mutex<HashSet<ChatId>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `chat_id` fail.
    #[must_use]
    pub fn failing_for(self, chat_id: ChatId) -> Self {
        self.failing.lock().insert(chat_id);
        self
    }

    /// Messages delivered so far, in order.
    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().clone()
    }

    /// Messages delivered to one chat.
    pub fn sent_to(&self, chat_id: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .filter(|(id, _)| *id == chat_id)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()> {
        if self.failing.lock().contains(&chat_id) {
            return Err(Error::Connection(format!("chat {chat_id} unreachable")));
        }
        self.sent.lock().push((chat_id, text.to_string()));
        Ok(())
    }
}
