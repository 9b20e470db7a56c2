//! BotConfig: BaseConfig + StoreConfig + ModelsConfig. Use load() for env-based loading.

use anyhow::Result;

use super::{BaseConfig, ModelsConfig, StoreConfig};

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub store: StoreConfig,
    pub models: ModelsConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let store = StoreConfig::from_env()?;
        let models = ModelsConfig::from_env()?;
        Ok(Self {
            base,
            store,
            models,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.store.validate()?;
        self.models.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn store(&self) -> &StoreConfig {
        &self.store
    }
    pub fn models(&self) -> &ModelsConfig {
        &self.models
    }

    pub fn bot_token(&self) -> Option<&str> {
        self.base.bot_token.as_deref()
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
}
