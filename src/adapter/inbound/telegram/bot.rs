//! Telegram dispatcher: text commands and pagination callbacks.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tokio::sync::watch;
use tracing::{error, info, warn};

use super::keyboard::{main_keyboard, pagination_keyboard};
use super::router::CommandRouter;
use crate::domain::ChatId;

/// Serve chat updates until `shutdown` flips.
///
/// With `register_commands` the "/" menu is published first; a failure
/// there is logged and the bot starts anyway.
pub async fn run_bot(
    bot: Bot,
    router: Arc<CommandRouter>,
    register_commands: bool,
    mut shutdown: watch::Receiver<bool>,
) {
    if register_commands {
        if let Err(e) = register_bot_commands(&bot, &router).await {
            warn!(error = %e, "Failed to register bot commands with Telegram");
        }
    }

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![router])
        .default_handler(|_| async {})
        .build();

    let token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        let _ = shutdown.changed().await;
        match token.shutdown() {
            Ok(done) => done.await,
            Err(e) => warn!(error = %e, "Dispatcher was not running"),
        }
    });

    info!("Telegram bot started");
    dispatcher.dispatch().await;
    info!("Telegram bot stopped");
}

fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
}

async fn on_message(bot: Bot, msg: Message, router: Arc<CommandRouter>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let reply = router.route(ChatId::new(msg.chat.id.0), text).await;
    let request = bot.send_message(msg.chat.id, reply.text);
    let result = match reply.pagination.as_ref().and_then(pagination_keyboard) {
        Some(buttons) => request.reply_markup(buttons).await,
        None => request.reply_markup(main_keyboard()).await,
    };

    if let Err(e) = result {
        error!(chat_id = msg.chat.id.0, error = %e, "Failed to send reply");
    }
    Ok(())
}

async fn on_callback(bot: Bot, query: CallbackQuery, router: Arc<CommandRouter>) -> ResponseResult<()> {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let (Some(data), Some(message)) = (query.data.as_deref(), query.message.as_ref()) else {
        return Ok(());
    };
    let chat = message.chat().id;
    let Some(reply) = router.callback(ChatId::new(chat.0), data).await else {
        return Ok(());
    };

    let edit = bot.edit_message_text(chat, message.id(), reply.text);
    let result = match reply.pagination.as_ref().and_then(pagination_keyboard) {
        Some(buttons) => edit.reply_markup(buttons).await,
        None => edit.await,
    };

    if let Err(e) = result {
        error!(chat_id = chat.0, error = %e, "Failed to edit pairs message");
    }
    Ok(())
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot, router: &CommandRouter) -> ResponseResult<()> {
    let commands: Vec<BotCommand> = router
        .menu()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
