//! Logs each inbound message in before() and the outcome in after(); always continues.

use async_trait::async_trait;
use newsbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

const LOG_TEXT_LIMIT: usize = 100;

/// First 100 characters of user text, with an ellipsis when cut.
pub fn truncate_for_log(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_TEXT_LIMIT).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_type = %message.message_type,
            message_content = %truncate_for_log(&message.content),
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use newsbot_core::{Chat, User};

    fn sample_message(content: &str) -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 1,
                username: Some("testuser".to_string()),
                first_name: Some("Test".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 123,
                chat_type: "private".to_string(),
            },
            content: content.to_string(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_logging_handler_before_continues() {
        let h = LoggingHandler;
        assert!(h.before(&sample_message("hello")).await.unwrap());
    }

    #[tokio::test]
    async fn test_logging_handler_after_ok() {
        let h = LoggingHandler;
        let response = HandlerResponse::Reply("hi".to_string());
        assert!(h.after(&sample_message("hello"), &response).await.is_ok());
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short"), "short");
        let long = "я".repeat(150);
        let cut = truncate_for_log(&long);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
    }
}
