//! SQLite backend for local development and tests.
//!
//! Accepts `sqlite:` URLs (including `sqlite::memory:`) or a plain file path; the file and the
//! tables are created on connect.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::connection::{Connector, LogConnection};
use crate::error::StorageError;
use crate::records::{FeedbackRecord, RequestRecord};
use crate::schema::SQLITE_STATEMENTS;

#[derive(Debug, Clone)]
pub struct SqliteConnector {
    database_url: String,
    statement_timeout: Duration,
}

impl SqliteConnector {
    pub fn new(database_url: impl Into<String>, statement_timeout: Duration) -> Self {
        Self {
            database_url: database_url.into(),
            statement_timeout,
        }
    }

    fn is_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }

    fn options(&self) -> Result<SqliteConnectOptions, StorageError> {
        let options = if self.database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(&self.database_url)
                .map_err(|e| StorageError::Connect(e.to_string()))?
        } else {
            SqliteConnectOptions::new().filename(&self.database_url)
        };
        Ok(options
            .create_if_missing(true)
            .busy_timeout(self.statement_timeout))
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    fn describe(&self) -> String {
        format!("sqlite {}", self.database_url)
    }

    async fn connect(&self) -> Result<Arc<dyn LogConnection>, StorageError> {
        info!("Initializing SQLite pool: {}", self.database_url);
        // An in-memory database lives as long as its single connection.
        let pool_options = if self.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };
        let pool = pool_options
            .acquire_timeout(self.statement_timeout)
            .connect_with(self.options()?)
            .await?;
        let connection = SqliteConnection { pool };
        connection.ensure_schema().await?;
        Ok(Arc::new(connection))
    }
}

#[derive(Debug, Clone)]
pub struct SqliteConnection {
    pool: SqlitePool,
}

#[async_trait]
impl LogConnection for SqliteConnection {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_request(&self, record: &RequestRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO requests_log (request_id, user_id, chat_id, message_id, news_text,
                predicted_label, prediction_probability, model_version, processing_time_ms)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.request_id.to_string())
        .bind(record.user_id)
        .bind(record.chat_id)
        .bind(record.message_id)
        .bind(&record.news_text)
        .bind(&record.predicted_label)
        .bind(record.prediction_probability)
        .bind(&record.model_version)
        .bind(i64::from(record.processing_time_ms))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_feedback(&self, record: &FeedbackRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO feedback (feedback_id, request_id, user_id, user_rating)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(record.request_id.to_string())
        .bind(record.user_id)
        .bind(record.user_rating.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        for statement in SQLITE_STATEMENTS {
            sqlx::query(*statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}
