//! Core types: user, chat, message, callback, reply, handler response, and Handler trait.
//!
//! Types are split into one file per main type for easier navigation.

mod callback;
mod chat;
mod handler;
mod message;
mod reply;
mod response;
mod user;

pub use callback::{CallbackAnswer, CallbackEvent};
pub use chat::Chat;
pub use handler::{Handler, ToCoreCallback, ToCoreMessage, ToCoreUser};
pub use message::Message;
pub use reply::{Reply, ReplyMarkup};
pub use response::HandlerResponse;
pub use user::User;
