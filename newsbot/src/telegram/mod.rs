//! Telegram layer: teloxide adapters, the [`newsbot_core::Bot`] implementation, and the update dispatcher.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{feedback_keyboard, render_markup, TelegramBotAdapter};
pub use runner::{build_teloxide_bot, run_dispatcher, Command};
