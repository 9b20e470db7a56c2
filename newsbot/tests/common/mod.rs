//! Shared test helpers: mock bot, model artifacts, messages and a wired-up bot harness.
#![allow(dead_code)]

pub mod mock_bot;

use std::path::Path;
use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use newsbot::config::ModelsConfig;
use newsbot::{
    build_feedback_correlator, build_handler_chain, build_prediction_dispatcher, BotComponents,
    FeedbackCorrelator, HandlerChain, InMemorySessionStore,
};
use newsbot_core::{CallbackEvent, Chat, Message, User};
use serde_json::json;
use storage::{Connector, LogConnection, PersistenceGateway, SqliteConnector, StorageError};
use tempfile::TempDir;
use tracing_subscriber::{fmt, EnvFilter};

use mock_bot::MockBot;

pub const LSVC_NAME: &str = "LinearSVC (Быстрая)";
pub const LGBM_NAME: &str = "LightGBM (Точная)";
pub const REAL_NEWS: &str = "This is an obviously true, officially verified report.";
pub const FAKE_NEWS: &str = "SHOCKING: secret alien hoax!";

const TIMEOUT: Duration = Duration::from_secs(5);

const VOCABULARY: &[&str] = &[
    "obviously", "true", "officially", "verified", "report", "shocking", "hoax", "alien", "secret",
    "confirmed",
];

static TRACING_INIT: Once = Once::new();

/// Initialize tracing once per test process; `RUST_LOG` controls the level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt().with_env_filter(env_filter).with_test_writer().try_init();
    });
}

fn write_json(dir: &Path, name: &str, value: serde_json::Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// Writes vectorizer.json, lsvc_model.json and lgbm_model.json into `dir`.
pub fn write_model_artifacts(dir: &Path) -> ModelsConfig {
    let vocabulary: serde_json::Map<String, serde_json::Value> = VOCABULARY
        .iter()
        .enumerate()
        .map(|(i, t)| (t.to_string(), json!(i)))
        .collect();
    write_json(
        dir,
        "vectorizer.json",
        json!({
            "vocabulary": vocabulary,
            "idf": vec![1.5; VOCABULARY.len()],
            "sublinear_tf": true,
            "norm": "l2"
        }),
    );
    write_json(
        dir,
        "lsvc_model.json",
        json!({
            "kind": "linear_svc",
            "coef": [-1.0, -1.0, -1.2, -1.5, -0.5, 2.0, 2.5, 1.8, 1.0, -1.0],
            "intercept": 0.1
        }),
    );
    write_json(
        dir,
        "lgbm_model.json",
        json!({
            "kind": "gradient_boosting",
            "init_score": -0.2,
            "trees": [
                { "nodes": [
                    {"feature": 6, "threshold": 0.0, "left": 1, "right": 2},
                    {"value": -1.1},
                    {"value": 2.4}
                ]},
                { "nodes": [
                    {"feature": 3, "threshold": 0.0, "left": 1, "right": 2},
                    {"value": 0.3},
                    {"value": -0.9}
                ]}
            ]
        }),
    );
    ModelsConfig::in_dir(dir)
}

/// Store that never comes up.
pub struct OfflineConnector;

#[async_trait]
impl Connector for OfflineConnector {
    fn describe(&self) -> String {
        "offline".to_string()
    }

    async fn connect(&self) -> Result<Arc<dyn LogConnection>, StorageError> {
        Err(StorageError::Connect("connection refused".to_string()))
    }
}

pub fn sqlite_url(dir: &TempDir) -> String {
    format!("sqlite://{}", dir.path().join("newsbot.db").display())
}

pub fn sqlite_gateway(dir: &TempDir) -> PersistenceGateway {
    PersistenceGateway::new(
        Arc::new(SqliteConnector::new(sqlite_url(dir), TIMEOUT)),
        TIMEOUT,
    )
}

pub fn offline_gateway() -> PersistenceGateway {
    PersistenceGateway::new(Arc::new(OfflineConnector), TIMEOUT)
}

pub async fn count_rows(url: &str, table: &str) -> i64 {
    let pool = sqlx::SqlitePool::connect(url).await.expect("open test pool");
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&pool)
        .await
        .expect("count rows");
    n
}

pub fn user(id: i64) -> User {
    User {
        id,
        username: Some("reader".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

fn message(user_id: i64, chat_id: i64, content: &str, message_type: &str) -> Message {
    Message {
        id: "7".to_string(),
        user: user(user_id),
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: message_type.to_string(),
        created_at: Utc::now(),
    }
}

pub fn text_message(user_id: i64, chat_id: i64, content: &str) -> Message {
    message(user_id, chat_id, content, "text")
}

pub fn photo_message(user_id: i64, chat_id: i64) -> Message {
    message(user_id, chat_id, "", "photo")
}

pub fn button_press(user_id: i64, chat_id: i64, message_id: &str, data: &str) -> CallbackEvent {
    CallbackEvent {
        id: "cb-1".to_string(),
        user: user(user_id),
        chat: Some(Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        }),
        message_id: Some(message_id.to_string()),
        data: data.to_string(),
    }
}

/// Fully wired bot: components built the production way, with a mock transport.
pub struct Harness {
    pub bot: Arc<MockBot>,
    pub components: BotComponents,
    pub chain: HandlerChain,
    pub correlator: FeedbackCorrelator,
    _models: TempDir,
}

impl Harness {
    pub fn new(gateway: PersistenceGateway) -> Self {
        init_tracing();
        let models = TempDir::new().unwrap();
        let config = write_model_artifacts(models.path());
        let dispatcher = build_prediction_dispatcher(&config).expect("dispatcher must build");

        let bot = Arc::new(MockBot::new());
        let components = BotComponents {
            bot: bot.clone(),
            dispatcher: Arc::new(dispatcher),
            gateway: Arc::new(gateway),
            sessions: Arc::new(InMemorySessionStore::new()),
        };
        let chain = build_handler_chain(&components);
        let correlator = build_feedback_correlator(&components);
        Self {
            bot,
            components,
            chain,
            correlator,
            _models: models,
        }
    }

    pub fn sessions(&self) -> &InMemorySessionStore {
        &self.components.sessions
    }

    pub async fn say(&self, user_id: i64, chat_id: i64, content: &str) {
        self.chain
            .handle(&text_message(user_id, chat_id, content))
            .await
            .expect("chain must not fail");
    }
}
