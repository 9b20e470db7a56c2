//! Error types for the bot core.
//!
//! [`BotError`] is the top-level error; [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error for the bot: outbound transport failures and handler failures.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced by handlers.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
