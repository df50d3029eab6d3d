//! Reply and inline keyboards.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use super::command::Pagination;
use super::router::page_callback_data;

/// Persistent keyboard attached to every command reply.
#[must_use]
pub fn main_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new("/price"),
            KeyboardButton::new("/add"),
            KeyboardButton::new("/pairs"),
        ],
        vec![KeyboardButton::new("/remove"), KeyboardButton::new("/list")],
    ])
    .resize_keyboard()
}

/// Previous/Next buttons for a `/pairs` page. `None` when there is only
/// one page.
#[must_use]
pub fn pagination_keyboard(pagination: &Pagination) -> Option<InlineKeyboardMarkup> {
    let mut row = Vec::new();
    if pagination.has_previous() {
        row.push(InlineKeyboardButton::callback(
            "⬅️ Previous",
            page_callback_data(pagination.page - 1),
        ));
    }
    if pagination.has_next() {
        row.push(InlineKeyboardButton::callback(
            "Next ➡️",
            page_callback_data(pagination.page + 1),
        ));
    }

    if row.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(vec![row]))
    }
}
