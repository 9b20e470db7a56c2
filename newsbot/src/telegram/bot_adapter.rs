//! Wraps teloxide::Bot and implements [`newsbot_core::Bot`]. Renders core reply markup into Telegram keyboards.

use async_trait::async_trait;
use newsbot_core::{parse_message_id, Bot as CoreBot, BotError, Chat, Reply, ReplyMarkup, Result};
use storage::Rating;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    KeyboardRemove, MessageId,
};
use uuid::Uuid;

use crate::dialog::texts;
use crate::feedback::FeedbackPayload;

/// Inline "correct / incorrect" buttons carrying the request id.
pub fn feedback_keyboard(request_id: Uuid) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(
            texts::FEEDBACK_CORRECT_BUTTON,
            FeedbackPayload::encode(request_id, Rating::Correct),
        ),
        InlineKeyboardButton::callback(
            texts::FEEDBACK_INCORRECT_BUTTON,
            FeedbackPayload::encode(request_id, Rating::Incorrect),
        ),
    ]])
}

/// Telegram markup for a reply; `None` leaves the user's keyboard untouched.
pub fn render_markup(markup: &ReplyMarkup) -> Option<teloxide::types::ReplyMarkup> {
    match markup {
        ReplyMarkup::None => None,
        ReplyMarkup::Choices(choices) => {
            let rows = choices
                .iter()
                .map(|c| vec![KeyboardButton::new(c.clone())])
                .collect::<Vec<_>>();
            Some(
                KeyboardMarkup::new(rows)
                    .resize_keyboard()
                    .one_time_keyboard()
                    .into(),
            )
        }
        ReplyMarkup::RemoveKeyboard => Some(KeyboardRemove::new().into()),
        ReplyMarkup::Feedback { request_id } => Some(feedback_keyboard(*request_id).into()),
    }
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String> {
        let mut request = self.bot.send_message(ChatId(chat.id), reply.text.clone());
        if let Some(markup) = render_markup(&reply.markup) {
            request = request.reply_markup(markup);
        }
        let sent = request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request =
            self.bot
                .edit_message_text(ChatId(chat.id), MessageId(id), reply.text.clone());
        if let ReplyMarkup::Feedback { request_id } = &reply.markup {
            request = request.reply_markup(feedback_keyboard(*request_id));
        }
        request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn clear_affordance(&self, chat: &Chat, message_id: &str) -> Result<()> {
        let id = parse_message_id(message_id)?;
        self.bot
            .edit_message_reply_markup(ChatId(chat.id), MessageId(id))
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        Ok(())
    }
}
