//! Mock implementation of [`newsbot_core::Bot`] for integration tests.
//!
//! Records every send, edit and affordance removal so tests can assert on the reply texts and
//! markups without hitting Telegram.

use async_trait::async_trait;
use newsbot_core::{Bot, BotError, Chat, Reply, Result};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Sent {
        chat_id: i64,
        message_id: String,
        reply: Reply,
    },
    Edited {
        chat_id: i64,
        message_id: String,
        reply: Reply,
    },
    Cleared {
        chat_id: i64,
        message_id: String,
    },
}

impl Outbound {
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Outbound::Sent { reply, .. } | Outbound::Edited { reply, .. } => Some(reply),
            Outbound::Cleared { .. } => None,
        }
    }
}

/// Mock Bot that hands out increasing message ids starting at 100.
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<Outbound>>,
    next_id: AtomicU32,
    fail_edits: AtomicBool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later `edit_reply` fail with a transport error.
    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Outbound> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// The reply of the most recent send or edit.
    pub fn last_reply(&self) -> Option<Reply> {
        self.calls()
            .iter()
            .rev()
            .find_map(|c| c.reply().cloned())
    }

    pub fn sent(&self) -> Vec<Reply> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Sent { reply, .. } => Some(reply),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<(String, Reply)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Edited {
                    message_id, reply, ..
                } => Some((message_id, reply)),
                _ => None,
            })
            .collect()
    }

    pub fn cleared(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Outbound::Cleared { message_id, .. } => Some(message_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Outbound) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_reply(&self, chat: &Chat, reply: &Reply) -> Result<String> {
        let message_id = (100 + self.next_id.fetch_add(1, Ordering::SeqCst)).to_string();
        self.record(Outbound::Sent {
            chat_id: chat.id,
            message_id: message_id.clone(),
            reply: reply.clone(),
        });
        Ok(message_id)
    }

    async fn edit_reply(&self, chat: &Chat, message_id: &str, reply: &Reply) -> Result<()> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(BotError::Transport("message can't be edited".to_string()));
        }
        self.record(Outbound::Edited {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn clear_affordance(&self, chat: &Chat, message_id: &str) -> Result<()> {
        self.record(Outbound::Cleared {
            chat_id: chat.id,
            message_id: message_id.to_string(),
        });
        Ok(())
    }
}
