//! Interactive callback (button press) type and the acknowledgment returned to the transport.

use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A press on an inline button. `message_id` is the message carrying the button, when still accessible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackEvent {
    pub id: String,
    pub user: User,
    pub chat: Option<Chat>,
    pub message_id: Option<String>,
    pub data: String,
}

/// How the transport should acknowledge a callback: a short toast, or a modal alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackAnswer {
    pub text: String,
    pub show_alert: bool,
}

impl CallbackAnswer {
    pub fn toast(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_alert: false,
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            show_alert: true,
        }
    }
}
