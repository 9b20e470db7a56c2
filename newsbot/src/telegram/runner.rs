//! Update dispatcher: messages go through the HandlerChain, button presses through the FeedbackCorrelator.
//!
//! teloxide's dispatcher processes updates of one chat sequentially, which keeps each session's
//! transitions in arrival order; different chats run concurrently.

use anyhow::Result;
use newsbot_core::{ToCoreCallback, ToCoreMessage};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::chain::HandlerChain;
use crate::feedback::FeedbackCorrelator;

/// Command menu registered with Telegram at startup.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "🚀 Запустить бота / Помощь")]
    Start,
    #[command(description = "🔎 Анализировать новость")]
    Analyze,
    #[command(description = "❌ Отменить текущее действие")]
    Cancel,
}

/// teloxide Bot for `token`, pointed at `api_url` when set.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> teloxide::Bot {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url_str) => match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    if let Err(e) = chain.handle(&core_msg).await {
        error!(
            error = %e,
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Handler chain failed"
        );
    }
    Ok(())
}

async fn on_callback(
    bot: teloxide::Bot,
    q: teloxide::types::CallbackQuery,
    correlator: Arc<FeedbackCorrelator>,
) -> ResponseResult<()> {
    let event = TelegramCallbackWrapper(&q).to_core();
    let answer = correlator.handle(&event).await;
    if let Err(e) = bot
        .answer_callback_query(q.id.clone())
        .text(answer.text)
        .show_alert(answer.show_alert)
        .await
    {
        error!(error = %e, user_id = event.user.id, "Failed to answer callback query");
    }
    Ok(())
}

/// Registers the command menu, then dispatches updates until Ctrl-C.
#[instrument(skip(bot, handler_chain, correlator))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    correlator: Arc<FeedbackCorrelator>,
) -> Result<()> {
    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => warn!(error = %e, "Failed to register bot commands"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    info!("Starting update dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain, correlator])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Update dispatcher stopped");
    Ok(())
}
