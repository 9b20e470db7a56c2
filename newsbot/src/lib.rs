//! # Fake news detector bot
//!
//! Wires the classifier, the analytical store and the Telegram transport. Loads config from env and
//! runs the update dispatcher.

pub mod chain;
pub mod cli;
pub mod components;
pub mod config;
pub mod dialog;
pub mod feedback;
pub mod handlers;
pub mod runner;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};

pub use chain::HandlerChain;

pub use components::{
    build_bot_components, build_feedback_correlator, build_gateway, build_handler_chain,
    build_prediction_dispatcher, BotComponents,
};
pub use config::{BotConfig, ModelsConfig, StoreBackend, StoreConfig};
pub use dialog::{ConversationHandler, DialogState, InMemorySessionStore, SessionKey, SessionStore};
pub use feedback::{FeedbackCorrelator, FeedbackPayload};
pub use handlers::LoggingHandler;
pub use runner::{init_db, predict_text, run_bot};
pub use telegram::{TelegramBotAdapter, TelegramCallbackWrapper, TelegramMessageWrapper};
