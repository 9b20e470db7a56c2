//! Handler trait and transport conversion traits.

use async_trait::async_trait;

use super::{callback::CallbackEvent, message::Message, response::HandlerResponse, user::User};

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific callback query to core [`CallbackEvent`].
pub trait ToCoreCallback: Send + Sync {
    fn to_core(&self) -> CallbackEvent;
}

/// One stage of the inbound pipeline. Every hook is optional.
#[async_trait]
pub trait Handler: Send + Sync {
    /// `false` drops the message before any handler sees it.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }

    /// Sees the final response of the chain.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
