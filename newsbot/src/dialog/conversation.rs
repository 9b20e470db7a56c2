//! Conversation state machine.
//!
//! `IDLE → AWAITING_MODEL_CHOICE → AWAITING_TEXT → IDLE`. `/analyze` restarts from any state, cancel
//! returns to idle from any state, and a submitted text always ends the dialog whatever the outcome.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use classifier::PredictionDispatcher;
use newsbot_core::{Bot, Handler, HandlerResponse, Message, Reply, ReplyMarkup, Result};
use storage::{AnalysisLog, NewRequest};
use tracing::{debug, error, info, instrument, warn};

use super::session::{DialogState, Session, SessionKey, SessionStore};
use super::texts;
use super::trigger::{classify, Trigger, CANCEL_KEYWORD};
use crate::handlers::truncate_for_log;

pub struct ConversationHandler {
    bot: Arc<dyn Bot>,
    sessions: Arc<dyn SessionStore>,
    dispatcher: Arc<PredictionDispatcher>,
    log: Arc<dyn AnalysisLog>,
}

impl ConversationHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        sessions: Arc<dyn SessionStore>,
        dispatcher: Arc<PredictionDispatcher>,
        log: Arc<dyn AnalysisLog>,
    ) -> Self {
        Self {
            bot,
            sessions,
            dispatcher,
            log,
        }
    }

    /// Every model display name, then the cancel button.
    fn model_keyboard(&self) -> ReplyMarkup {
        let mut choices = self.dispatcher.registry().display_names();
        choices.push(CANCEL_KEYWORD.to_string());
        ReplyMarkup::Choices(choices)
    }

    async fn send(&self, message: &Message, reply: Reply) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply.text))
    }

    async fn welcome(&self, message: &Message, key: SessionKey) -> Result<HandlerResponse> {
        self.sessions.reset(key).await;
        let text = texts::welcome(message.user.display_name());
        self.send(message, Reply::text(text)).await
    }

    async fn start_analysis(&self, message: &Message, key: SessionKey) -> Result<HandlerResponse> {
        self.sessions.set(key, Session::awaiting_model_choice()).await;
        info!(user_id = key.user_id, chat_id = key.chat_id, "Model choice requested");
        self.send(
            message,
            Reply::with_markup(texts::CHOOSE_MODEL, self.model_keyboard()),
        )
        .await
    }

    async fn cancel(&self, message: &Message, key: SessionKey) -> Result<HandlerResponse> {
        let session = self.sessions.get(key).await;
        if session.is_idle() {
            return self
                .send(
                    message,
                    Reply::with_markup(texts::NOTHING_TO_CANCEL, ReplyMarkup::RemoveKeyboard),
                )
                .await;
        }
        info!(user_id = key.user_id, state = ?session.state, "Dialog cancelled");
        self.sessions.reset(key).await;
        self.send(
            message,
            Reply::with_markup(texts::CANCELLED, ReplyMarkup::RemoveKeyboard),
        )
        .await
    }

    async fn choose_model(
        &self,
        message: &Message,
        key: SessionKey,
        choice: &str,
    ) -> Result<HandlerResponse> {
        // Surrounding whitespace is ignored, as for the cancel keyword.
        let Some(model) = self.dispatcher.registry().find_by_display_name(choice.trim()) else {
            debug!(user_id = key.user_id, choice = %choice, "Unknown model choice");
            return self
                .send(
                    message,
                    Reply::with_markup(texts::CHOOSE_FROM_KEYBOARD, self.model_keyboard()),
                )
                .await;
        };

        self.sessions
            .set(key, Session::awaiting_text(model.identifier.clone()))
            .await;
        info!(user_id = key.user_id, model = %model.identifier, "Model selected");
        let text = texts::model_selected(&model.display_name, &model.description);
        self.send(message, Reply::with_markup(text, ReplyMarkup::RemoveKeyboard))
            .await
    }

    async fn analyze(
        &self,
        message: &Message,
        key: SessionKey,
        session: Session,
        text: &str,
    ) -> Result<HandlerResponse> {
        self.sessions.reset(key).await;

        let Some(model_id) = session.selected_model else {
            error!(user_id = key.user_id, "Awaiting text without a selected model");
            return self.send(message, Reply::text(texts::MODEL_NOT_SELECTED)).await;
        };
        let display_name = self
            .dispatcher
            .registry()
            .resolve(&model_id)
            .map(|m| m.display_name.clone())
            .unwrap_or_else(|| model_id.clone());

        info!(
            user_id = key.user_id,
            model = %model_id,
            text = %truncate_for_log(text),
            "Analysis requested"
        );
        let started = Instant::now();
        let status_id = match self.bot.reply_to(message, &Reply::text(texts::ANALYZING)).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "Failed to send status message");
                None
            }
        };

        let prediction = self.dispatcher.predict(text, &model_id);
        let processing_time_ms = u32::try_from(started.elapsed().as_millis()).unwrap_or(u32::MAX);

        let request_id = self
            .log
            .log_request(NewRequest {
                user_id: message.user.id,
                chat_id: message.chat.id,
                message_id: message.numeric_id(),
                news_text: text.to_string(),
                predicted_label: prediction.label.as_str().to_string(),
                confidence: prediction.confidence,
                model_version: display_name.clone(),
                processing_time_ms,
            })
            .await;
        if request_id.is_none() {
            warn!(user_id = key.user_id, "Request not logged, replying without feedback buttons");
        }

        let markup = match request_id {
            Some(request_id) if !prediction.is_error() => ReplyMarkup::Feedback { request_id },
            _ => ReplyMarkup::None,
        };
        let reply = Reply::with_markup(texts::result(&prediction, &display_name), markup);
        self.deliver_result(message, status_id, &reply).await?;
        Ok(HandlerResponse::Reply(reply.text))
    }

    /// Edits the status message into the result; sends a new reply if there is none or the edit fails.
    async fn deliver_result(
        &self,
        message: &Message,
        status_id: Option<String>,
        reply: &Reply,
    ) -> Result<()> {
        if let Some(status_id) = status_id {
            match self.bot.edit_reply(&message.chat, &status_id, reply).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, "Failed to edit status message, sending a new reply"),
            }
        }
        self.bot.reply_to(message, reply).await.map(|_| ())
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() {
            debug!(message_type = %message.message_type, "Non-text message ignored");
            return Ok(HandlerResponse::Ignore);
        }

        let key = SessionKey::of(message);
        match classify(&message.content) {
            Trigger::Welcome => self.welcome(message, key).await,
            Trigger::Analyze => self.start_analysis(message, key).await,
            Trigger::Cancel => self.cancel(message, key).await,
            Trigger::Text(text) => {
                let session = self.sessions.get(key).await;
                match session.state {
                    DialogState::Idle => {
                        debug!("Text outside of a dialog ignored");
                        Ok(HandlerResponse::Ignore)
                    }
                    DialogState::AwaitingModelChoice => {
                        self.choose_model(message, key, &text).await
                    }
                    DialogState::AwaitingText => self.analyze(message, key, session, &text).await,
                }
            }
        }
    }
}
