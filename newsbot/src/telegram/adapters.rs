//! Adapters from Telegram (teloxide) types to newsbot_core types.

use newsbot_core::{CallbackEvent, Chat, Message, ToCoreCallback, ToCoreMessage, ToCoreUser, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else {
        "channel"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`]. Non-text messages get empty content.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    fn message_type(&self) -> &'static str {
        let msg = self.0;
        if msg.text().is_some() {
            "text"
        } else if msg.photo().is_some() {
            "photo"
        } else if msg.document().is_some() {
            "document"
        } else if msg.sticker().is_some() {
            "sticker"
        } else if msg.voice().is_some() {
            "voice"
        } else {
            "other"
        }
    }
}

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: core_chat(&self.0.chat),
            content: self.0.text().unwrap_or("").to_string(),
            message_type: self.message_type().to_string(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackEvent`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreCallback for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> CallbackEvent {
        let q = self.0;
        CallbackEvent {
            id: q.id.to_string(),
            user: TelegramUserWrapper(&q.from).to_core(),
            chat: q.message.as_ref().map(|m| core_chat(m.chat())),
            message_id: q.message.as_ref().map(|m| m.id().to_string()),
            data: q.data.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
        assert_eq!(core_user.display_name(), "Test");
    }
}
