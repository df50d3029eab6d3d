use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::debug;

use crate::adapter::inbound::telegram::keyboard::main_keyboard;
use crate::domain::ChatId;
use crate::error::Result;
use crate::port::outbound::messenger::Messenger;

/// [`Messenger`] that sends through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(teloxide::types::ChatId(chat_id.get()), text)
            .reply_markup(main_keyboard())
            .await?;
        debug!(chat_id = %chat_id, "Delivered Telegram message");
        Ok(())
    }
}
