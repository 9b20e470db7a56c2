//! Binary for the fake news detector bot.

use anyhow::Result;
use clap::Parser;
use newsbot::{init_db, load_config, predict_text, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run_bot(load_config(token)?).await,
        Commands::InitDb => init_db(load_config(None)?).await,
        Commands::Predict { model, text } => predict_text(load_config(None)?, &model, &text).await,
    }
}
