//! Bot configuration: BaseConfig (Telegram + log) + StoreConfig (analytical store) + ModelsConfig (artifacts).

mod base;
mod bot_config;
mod models;
mod store;


pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use models::{ModelsConfig, MODEL_TABLE};
pub use store::{StoreBackend, StoreConfig};
