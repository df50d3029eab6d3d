//! Telegram delivery for scheduled notifications.

mod messenger;

pub use messenger::TelegramMessenger;
