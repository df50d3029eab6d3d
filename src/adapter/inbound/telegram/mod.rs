//! Telegram chat surface.
//!
//! [`router`] and [`command`] are transport-free; [`bot`] and [`keyboard`]
//! bind them to teloxide.

#[cfg(feature = "telegram")]
pub mod bot;
pub mod command;
#[cfg(feature = "telegram")]
pub mod keyboard;
pub mod messages;
pub mod router;

pub use command::{CommandHandler, Pagination, Reply};
pub use router::CommandRouter;
