//! # Handler chain
//!
//! Every inbound message runs through three phases:
//! 1. `before` on every handler in order; the first `false` drops the message (`Stop`).
//! 2. `handle` in order until one answers `Reply` or `Stop`.
//! 3. `after` on every handler in reverse order, with the final response.
//!
//! When no handler answers, the outcome is `Ignore` if any handler ignored the message, else `Continue`.

use std::sync::Arc;
use std::time::Instant;

use newsbot_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    std::any::type_name_of_val(handler.as_ref())
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler; handlers run in insertion order.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    async fn admitted(&self, message: &Message) -> Result<bool> {
        for handler in &self.handlers {
            if !handler.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = handler_name(handler),
                    "step: message dropped in before"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn dispatch(&self, message: &Message) -> Result<HandlerResponse> {
        let mut ignored = false;
        for handler in &self.handlers {
            let response = handler.handle(message).await?;
            debug!(handler = handler_name(handler), response = ?response, "step: handled");
            match response {
                HandlerResponse::Reply(_) | HandlerResponse::Stop => return Ok(response),
                HandlerResponse::Ignore => ignored = true,
                HandlerResponse::Continue => {}
            }
        }
        Ok(if ignored {
            HandlerResponse::Ignore
        } else {
            HandlerResponse::Continue
        })
    }

    /// Runs one message through the chain and returns the final response.
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let started = Instant::now();
        info!(message_id = %message.id, "step: handler_chain started");

        let response = if self.admitted(message).await? {
            self.dispatch(message).await?
        } else {
            HandlerResponse::Stop
        };

        for handler in self.handlers.iter().rev() {
            handler.after(message, &response).await?;
        }

        info!(
            message_id = %message.id,
            response = ?response,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "step: handler_chain finished"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use newsbot_core::{Chat, User};
    use std::sync::Mutex;

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Step {
        name: &'static str,
        admit: bool,
        response: HandlerResponse,
        journal: Journal,
    }

    impl Step {
        fn new(name: &'static str, response: HandlerResponse, journal: &Journal) -> Arc<Self> {
            Arc::new(Self {
                name,
                admit: true,
                response,
                journal: journal.clone(),
            })
        }

        fn note(&self, phase: &str) {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:{}", phase, self.name));
        }
    }

    #[async_trait]
    impl Handler for Step {
        async fn before(&self, _message: &Message) -> Result<bool> {
            self.note("before");
            Ok(self.admit)
        }

        async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
            self.note("handle");
            Ok(self.response.clone())
        }

        async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
            self.note("after");
            Ok(())
        }
    }

    fn message() -> Message {
        Message {
            id: "1".to_string(),
            user: User {
                id: 1,
                username: None,
                first_name: Some("Test".to_string()),
                last_name: None,
            },
            chat: Chat {
                id: 1,
                chat_type: "private".to_string(),
            },
            content: "/analyze".to_string(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
        }
    }

    /// **Test: a reply stops the handle phase; after runs in reverse on every handler.**
    #[tokio::test]
    async fn test_reply_short_circuits_handle() {
        let journal = Journal::default();
        let chain = HandlerChain::new()
            .add_handler(Step::new("log", HandlerResponse::Continue, &journal))
            .add_handler(Step::new("dialog", HandlerResponse::Reply("ok".into()), &journal))
            .add_handler(Step::new("late", HandlerResponse::Continue, &journal));

        let response = chain.handle(&message()).await.unwrap();

        assert_eq!(response, HandlerResponse::Reply("ok".into()));
        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "before:log", "before:dialog", "before:late", "handle:log", "handle:dialog",
                "after:late", "after:dialog", "after:log",
            ]
        );
    }

    /// **Test: a handler refusing in before drops the message before any handle.**
    #[tokio::test]
    async fn test_before_false_stops() {
        let journal = Journal::default();
        let gate = Arc::new(Step {
            name: "gate",
            admit: false,
            response: HandlerResponse::Continue,
            journal: journal.clone(),
        });
        let chain = HandlerChain::new()
            .add_handler(gate)
            .add_handler(Step::new("dialog", HandlerResponse::Reply("ok".into()), &journal));

        assert_eq!(chain.handle(&message()).await.unwrap(), HandlerResponse::Stop);
        assert!(!journal.lock().unwrap().iter().any(|e| e.starts_with("handle:")));
    }

    #[tokio::test]
    async fn test_ignored_message_reports_ignore() {
        let journal = Journal::default();
        let chain = HandlerChain::new()
            .add_handler(Step::new("log", HandlerResponse::Continue, &journal))
            .add_handler(Step::new("dialog", HandlerResponse::Ignore, &journal));
        assert_eq!(chain.handle(&message()).await.unwrap(), HandlerResponse::Ignore);
        assert!(HandlerChain::new().is_empty());
        assert_eq!(chain.len(), 2);
    }
}
