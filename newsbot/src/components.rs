//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use classifier::{LinguisticResources, ModelRegistry, PredictionDispatcher};
use newsbot_core::Bot;
use std::sync::Arc;
use storage::{AnalysisLog, ClickHouseConnector, Connector, PersistenceGateway, SqliteConnector};
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::{BotConfig, ModelsConfig, StoreBackend, StoreConfig};
use crate::dialog::{ConversationHandler, InMemorySessionStore, SessionStore};
use crate::feedback::FeedbackCorrelator;
use crate::handlers::LoggingHandler;

/// Shared services behind the handler chain and the feedback correlator.
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub dispatcher: Arc<PredictionDispatcher>,
    pub gateway: Arc<PersistenceGateway>,
    pub sessions: Arc<InMemorySessionStore>,
}

/// Loads linguistic resources, the vectorizer and every model. Any failure is fatal at startup.
#[instrument(skip(models))]
pub fn build_prediction_dispatcher(models: &ModelsConfig) -> Result<PredictionDispatcher> {
    let resources = LinguisticResources::load(models.stopwords_path())
        .context("Failed to load stop words")?;
    let registry = ModelRegistry::load(&models.vectorizer_path, &models.model_specs()).map_err(|e| {
        error!(
            error = %e,
            model_dir = %models.model_dir.display(),
            "Failed to load model artifacts"
        );
        anyhow::anyhow!("Failed to load model artifacts: {}", e)
    })?;
    PredictionDispatcher::new(Arc::new(registry), &resources)
        .context("Failed to build the text preprocessor")
}

/// Connector for the configured store backend.
pub fn build_connector(store: &StoreConfig) -> Arc<dyn Connector> {
    match store.backend {
        StoreBackend::ClickHouse => {
            info!(
                url = %store.clickhouse_url(),
                database = %store.ch_database,
                "Using ClickHouse store"
            );
            Arc::new(ClickHouseConnector::new(store.clickhouse_settings()))
        }
        StoreBackend::Sqlite => {
            info!(path = %store.sqlite_path, "Using SQLite store");
            Arc::new(SqliteConnector::new(
                store.sqlite_path.clone(),
                store.statement_timeout(),
            ))
        }
    }
}

/// Gateway over the configured backend. Does not connect; the first write (or a startup check) does.
pub fn build_gateway(store: &StoreConfig) -> PersistenceGateway {
    PersistenceGateway::new(build_connector(store), store.connect_timeout())
}

/// Builds BotComponents with the given outbound bot (teloxide adapter in production, a mock in tests).
#[instrument(skip(config, bot))]
pub fn build_bot_components(config: &BotConfig, bot: Arc<dyn Bot>) -> Result<BotComponents> {
    let dispatcher = Arc::new(build_prediction_dispatcher(config.models())?);
    let gateway = Arc::new(build_gateway(config.store()));
    Ok(BotComponents {
        bot,
        dispatcher,
        gateway,
        sessions: Arc::new(InMemorySessionStore::new()),
    })
}

/// Builds the handler chain (logging → conversation).
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    let sessions: Arc<dyn SessionStore> = components.sessions.clone();
    let log: Arc<dyn AnalysisLog> = components.gateway.clone();
    let conversation = Arc::new(ConversationHandler::new(
        components.bot.clone(),
        sessions,
        components.dispatcher.clone(),
        log,
    ));
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(conversation)
}

pub fn build_feedback_correlator(components: &BotComponents) -> FeedbackCorrelator {
    let log: Arc<dyn AnalysisLog> = components.gateway.clone();
    FeedbackCorrelator::new(components.bot.clone(), log)
}
