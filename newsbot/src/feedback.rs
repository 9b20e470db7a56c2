//! Feedback correlator: resolves an inline-button press back to its analysis request.
//!
//! The request id travels inside the button payload (`feedback:<request_id>:<rating>`), so no
//! in-memory correlation table is kept.

use std::str::FromStr;
use std::sync::Arc;

use newsbot_core::{Bot, CallbackAnswer, CallbackEvent};
use storage::{AnalysisLog, Rating};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::dialog::texts;

const PAYLOAD_PREFIX: &str = "feedback";

/// Decoded button payload. `request_id` is kept as text; the store validates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPayload {
    pub request_id: String,
    pub rating: Rating,
}

impl FeedbackPayload {
    pub fn encode(request_id: Uuid, rating: Rating) -> String {
        format!("{}:{}:{}", PAYLOAD_PREFIX, request_id, rating.as_str())
    }

    /// `None` unless the payload is `feedback:<id>:<correct|incorrect>` with a non-empty id.
    pub fn decode(data: &str) -> Option<Self> {
        let mut parts = data.splitn(3, ':');
        let prefix = parts.next()?;
        let request_id = parts.next()?;
        let rating = parts.next()?;
        if prefix != PAYLOAD_PREFIX || request_id.is_empty() {
            return None;
        }
        Some(Self {
            request_id: request_id.to_string(),
            rating: Rating::from_str(rating).ok()?,
        })
    }
}

pub struct FeedbackCorrelator {
    bot: Arc<dyn Bot>,
    log: Arc<dyn AnalysisLog>,
}

impl FeedbackCorrelator {
    pub fn new(bot: Arc<dyn Bot>, log: Arc<dyn AnalysisLog>) -> Self {
        Self { bot, log }
    }

    /// Records the feedback and returns how the button press should be acknowledged.
    ///
    /// On success the user also gets a confirmation message and the buttons are removed from the
    /// result message; both are best-effort.
    #[instrument(skip(self, event), fields(user_id = event.user.id))]
    pub async fn handle(&self, event: &CallbackEvent) -> CallbackAnswer {
        let Some(payload) = FeedbackPayload::decode(&event.data) else {
            warn!(data = %event.data, "Malformed feedback payload");
            return CallbackAnswer::alert(texts::FEEDBACK_FAILED);
        };

        info!(
            request_id = %payload.request_id,
            rating = %payload.rating,
            "Feedback received"
        );
        let logged = self
            .log
            .log_feedback(&payload.request_id, event.user.id, payload.rating)
            .await;
        if !logged {
            return CallbackAnswer::alert(texts::FEEDBACK_FAILED);
        }

        if let Some(chat) = &event.chat {
            let confirmation = texts::feedback_recorded(payload.rating);
            if let Err(e) = self.bot.send_message(chat, &confirmation).await {
                error!(error = %e, "Failed to send feedback confirmation");
            }
            if let Some(message_id) = &event.message_id {
                if let Err(e) = self.bot.clear_affordance(chat, message_id).await {
                    warn!(error = %e, "Failed to remove feedback buttons");
                }
            }
        }
        CallbackAnswer::toast(texts::FEEDBACK_THANKS)
    }
}
