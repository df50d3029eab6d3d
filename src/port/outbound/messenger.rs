//! Messenger port for pushing text to a chat.

use async_trait::async_trait;

use crate::domain::ChatId;
use crate::error::Result;

/// Delivers messages to chats outside of a request/reply exchange
/// (scheduled notifications).
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to `chat_id`.
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()>;
}
