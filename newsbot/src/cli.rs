//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "newsbot")]
#[command(about = "Fake news detector Telegram bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Create the database and tables on the configured store.
    InitDb,
    /// Classify a text offline with the configured model artifacts.
    Predict {
        /// Model identifier (linear_svc, lgbm).
        #[arg(short, long, default_value = "linear_svc")]
        model: String,
        /// News text to classify.
        text: String,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}
