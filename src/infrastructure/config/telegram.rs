//! Telegram bot configuration.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Environment variable holding the bot token.
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Telegram bot configuration.
///
/// The token never comes from the config file; it is read from
/// `TELEGRAM_BOT_TOKEN` when the config is parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Register commands for the "/" menu on startup (default: true).
    #[serde(default = "default_true")]
    pub register_commands: bool,
    #[serde(skip)]
    pub bot_token: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            register_commands: default_true(),
            bot_token: None,
        }
    }
}

impl TelegramConfig {
    /// Bot token, required by the modes that run the bot.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingField`] when the token is not set.
    pub fn token(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField { field: BOT_TOKEN_ENV }.into())
    }
}
