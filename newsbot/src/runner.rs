use anyhow::Result;
use newsbot_core::{init_tracing, Bot};
use std::sync::Arc;
use storage::AnalysisLog;
use tracing::{error, info, instrument};

use crate::components::{
    build_bot_components, build_feedback_correlator, build_gateway, build_handler_chain,
    build_prediction_dispatcher,
};
use crate::config::BotConfig;
use crate::dialog::texts;
use crate::telegram::{build_teloxide_bot, run_dispatcher, TelegramBotAdapter};

/// Main entry: validate config, init logging, load models, check the store, then dispatch updates.
///
/// An unreachable store is reported but not fatal: analyses are still answered, only without
/// feedback buttons, and the gateway reconnects on the next write.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let token = config.base().require_token()?;
    let teloxide_bot = build_teloxide_bot(token, config.telegram_api_url());
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    info!(
        store_backend = %config.store().backend,
        model_dir = %config.models().model_dir.display(),
        "Initializing bot"
    );
    let components = build_bot_components(&config, bot)?;

    if components.gateway.check_connection().await {
        info!("Analytical store reachable");
    } else {
        error!("Analytical store unreachable at startup, requests will not be logged until it recovers");
    }
    info!(
        policy = ?components.gateway.delivery_policy(),
        "Analysis log delivery policy"
    );

    let handler_chain = build_handler_chain(&components);
    let correlator = Arc::new(build_feedback_correlator(&components));

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, handler_chain, correlator).await
}

/// Creates the database and tables on the configured store.
#[instrument(skip(config))]
pub async fn init_db(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let gateway = build_gateway(config.store());
    gateway.ensure_schema().await.map_err(|e| {
        error!(error = %e, backend = %config.store().backend, "Failed to create schema");
        anyhow::anyhow!("Failed to create schema: {}", e)
    })?;
    info!(backend = %config.store().backend, "Schema ready");
    Ok(())
}

/// Classifies `text` with `model` and prints the formatted verdict. Nothing is logged to the store.
#[instrument(skip(config, text))]
pub async fn predict_text(config: BotConfig, model: &str, text: &str) -> Result<()> {
    config.models().validate()?;
    init_tracing(config.log_file())?;

    let dispatcher = build_prediction_dispatcher(config.models())?;
    let display_name = dispatcher
        .registry()
        .resolve(model)
        .map(|m| m.display_name.clone())
        .unwrap_or_else(|| model.to_string());
    let prediction = dispatcher.predict(text, model);
    println!("{}", texts::result(&prediction, &display_name));
    Ok(())
}
