//! Per-(user, chat) dialog sessions. Process memory only; a restart forgets every session.

use std::collections::HashMap;

use async_trait::async_trait;
use newsbot_core::Message;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub user_id: i64,
    pub chat_id: i64,
}

impl SessionKey {
    pub fn of(message: &Message) -> Self {
        Self {
            user_id: message.user.id,
            chat_id: message.chat.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Idle,
    AwaitingModelChoice,
    AwaitingText,
}

/// Exactly one active state plus the model picked in the first step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub state: DialogState,
    pub selected_model: Option<String>,
}

impl Session {
    pub fn awaiting_model_choice() -> Self {
        Self {
            state: DialogState::AwaitingModelChoice,
            selected_model: None,
        }
    }

    pub fn awaiting_text(model_identifier: impl Into<String>) -> Self {
        Self {
            state: DialogState::AwaitingText,
            selected_model: Some(model_identifier.into()),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == DialogState::Idle
    }
}

/// Session storage. A key that was never written reads as an idle session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: SessionKey) -> Session;

    async fn set(&self, key: SessionKey, session: Session);

    /// Back to idle; forgets any selected model.
    async fn reset(&self, key: SessionKey);
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionKey, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-idle sessions held.
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: SessionKey) -> Session {
        self.sessions
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    async fn set(&self, key: SessionKey, session: Session) {
        let mut sessions = self.sessions.write().await;
        if session.is_idle() {
            sessions.remove(&key);
        } else {
            sessions.insert(key, session);
        }
    }

    async fn reset(&self, key: SessionKey) {
        self.sessions.write().await.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: SessionKey = SessionKey {
        user_id: 1,
        chat_id: 10,
    };

    #[tokio::test]
    async fn test_unknown_key_is_idle() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(KEY).await, Session::default());
        assert!(store.get(KEY).await.is_idle());
    }

    #[tokio::test]
    async fn test_set_and_reset() {
        let store = InMemorySessionStore::new();
        store.set(KEY, Session::awaiting_text("lgbm")).await;
        assert_eq!(store.get(KEY).await.selected_model.as_deref(), Some("lgbm"));
        assert_eq!(store.active_sessions().await, 1);

        store.reset(KEY).await;
        assert!(store.get(KEY).await.is_idle());
        assert_eq!(store.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn test_sessions_are_keyed_by_user_and_chat() {
        let store = InMemorySessionStore::new();
        let other_chat = SessionKey {
            user_id: 1,
            chat_id: 11,
        };
        store.set(KEY, Session::awaiting_model_choice()).await;
        assert!(store.get(other_chat).await.is_idle());
        assert_eq!(store.get(KEY).await.state, DialogState::AwaitingModelChoice);
    }
}
