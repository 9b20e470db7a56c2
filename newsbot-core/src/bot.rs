//! Bot abstraction for sending replies, editing them, and removing affordances.
//!
//! [`Bot`] is transport-agnostic; the teloxide implementation lives in the `newsbot` crate so that tests
//! can substitute a recording mock.

use crate::error::{HandlerError, Result};
use crate::types::{Chat, Message, Reply};
use async_trait::async_trait;

/// Abstraction for outbound traffic. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply (text + markup) to the chat and returns the transport message id.
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String>;

    /// Replaces the text (and inline markup) of an already-sent message. Choice keyboards cannot be
    /// attached on edit; implementations drop them.
    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()>;

    /// Removes the inline affordance from a message, leaving its text untouched.
    async fn clear_affordance(&self, chat: &Chat, message_id: &str) -> Result<()>;

    /// Sends a reply into the message's chat.
    async fn reply_to(&self, message: &Message, reply: &Reply) -> Result<String> {
        self.send_reply(&message.chat, reply).await
    }

    /// Sends plain text to the chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send_reply(chat, &Reply::text(text)).await.map(|_| ())
    }
}

/// Parses a transport message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| HandlerError::InvalidMessageId(s.to_string()).into())
}
