//! Telegram connection and log file settings.

use anyhow::{bail, Result};
use std::env;

const DEFAULT_LOG_FILE: &str = "logs/newsbot.log";

/// First of `keys` that is set to a non-blank value.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// `--token`, else BOT_TOKEN, else APP_TOKEN. Only `run` needs it.
    pub bot_token: Option<String>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL; the public Bot API when unset.
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
}

impl BaseConfig {
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            bot_token: token
                .filter(|t| !t.trim().is_empty())
                .or_else(|| first_env(&["BOT_TOKEN", "APP_TOKEN"])),
            telegram_api_url: first_env(&["TELEGRAM_API_URL", "TELOXIDE_API_URL"]),
            log_file: first_env(&["LOG_FILE"]).unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }

    /// The API URL, when set, must parse.
    pub fn validate(&self) -> Result<()> {
        match self.telegram_api_url.as_deref() {
            Some(url) if reqwest::Url::parse(url).is_err() => {
                bail!("TELEGRAM_API_URL (or TELOXIDE_API_URL) is not a valid URL: {}", url)
            }
            _ => Ok(()),
        }
    }

    /// Token for the Telegram API; error when neither BOT_TOKEN nor APP_TOKEN is set.
    pub fn require_token(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN (or APP_TOKEN) not set"))
    }
}
