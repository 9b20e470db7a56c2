//! Outbound reply: plain text plus an optional, transport-rendered affordance.

use uuid::Uuid;

/// What to attach to a reply. Rendering (keyboard layout, button captions) is the transport's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// Plain text, keep whatever keyboard the user currently has.
    None,
    /// One-shot choice keyboard; each entry is sent back verbatim as a text message.
    Choices(Vec<String>),
    /// Remove the choice keyboard.
    RemoveKeyboard,
    /// Inline "correct / incorrect" buttons bound to a logged request.
    Feedback { request_id: Uuid },
}

/// Reply text with its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markup: ReplyMarkup,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: ReplyMarkup::None,
        }
    }

    pub fn with_markup(text: impl Into<String>, markup: ReplyMarkup) -> Self {
        Self {
            text: text.into(),
            markup,
        }
    }

    /// Request id of the feedback affordance, if this reply carries one.
    pub fn feedback_request_id(&self) -> Option<Uuid> {
        match self.markup {
            ReplyMarkup::Feedback { request_id } => Some(request_id),
            _ => None,
        }
    }
}
