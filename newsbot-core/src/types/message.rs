//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single inbound message. `content` is empty for non-text messages (photos, stickers, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Numeric transport message id; 0 when the id is not numeric.
    pub fn numeric_id(&self) -> i64 {
        self.id.parse().unwrap_or(0)
    }

    /// True for text messages; other kinds arrive with empty `content`.
    pub fn is_text(&self) -> bool {
        self.message_type == "text"
    }
}
