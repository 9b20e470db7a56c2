//! # newsbot-core
//!
//! Core types and traits for the news-analysis bot: [`Bot`], [`Handler`], message, callback and reply
//! types, and tracing initialization. Transport-agnostic; the teloxide adapter lives in the `newsbot` crate.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    CallbackAnswer, CallbackEvent, Chat, Handler, HandlerResponse, Message, Reply, ReplyMarkup,
    ToCoreCallback, ToCoreMessage, ToCoreUser, User,
};
