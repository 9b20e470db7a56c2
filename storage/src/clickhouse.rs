//! ClickHouse backend over the HTTP interface (default port 8123).
//!
//! Statements go in the `query` URL parameter; insert rows go in the body as `JSONEachRow`.
//! Table names are always qualified with the database so the server default database never matters.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::connection::{Connector, LogConnection};
use crate::error::StorageError;
use crate::records::{FeedbackRecord, RequestRecord};
use crate::schema::{clickhouse_statements, FEEDBACK_TABLE, REQUESTS_TABLE};

const REQUEST_COLUMNS: &str = "request_id, user_id, chat_id, message_id, news_text, \
     predicted_label, prediction_probability, model_version, processing_time_ms";
const FEEDBACK_COLUMNS: &str = "request_id, user_id, user_rating";

#[derive(Debug, Clone)]
pub struct ClickHouseSettings {
    /// Base URL of the HTTP interface, e.g. `http://clickhouse-server:8123`.
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub connect_timeout: Duration,
    pub statement_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ClickHouseConnector {
    settings: ClickHouseSettings,
}

impl ClickHouseConnector {
    pub fn new(settings: ClickHouseSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Connector for ClickHouseConnector {
    fn describe(&self) -> String {
        format!("clickhouse {} db={}", self.settings.url, self.settings.database)
    }

    async fn connect(&self) -> Result<Arc<dyn LogConnection>, StorageError> {
        let client = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.statement_timeout)
            .build()
            .map_err(|e| StorageError::Connect(e.to_string()))?;
        let connection = ClickHouseConnection {
            client,
            settings: self.settings.clone(),
        };
        connection.ping().await?;
        info!(url = %self.settings.url, database = %self.settings.database, "Connected to ClickHouse");
        Ok(Arc::new(connection))
    }
}

#[derive(Debug, Clone)]
pub struct ClickHouseConnection {
    client: reqwest::Client,
    settings: ClickHouseSettings,
}

impl ClickHouseConnection {
    /// Runs one statement; returns the response body.
    async fn execute(&self, sql: &str, body: Option<String>) -> Result<String, StorageError> {
        debug!(sql = %sql, "ClickHouse statement");
        let mut request = self
            .client
            .post(&self.settings.url)
            .query(&[("query", sql)])
            .header("X-ClickHouse-User", &self.settings.user)
            .header("X-ClickHouse-Key", &self.settings.password);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(StorageError::Query(format!("{}: {}", status, text.trim())));
        }
        Ok(text)
    }

    async fn insert_row<T: Serialize + Sync>(
        &self,
        table: &str,
        columns: &str,
        row: &T,
    ) -> Result<(), StorageError> {
        let sql = format!(
            "INSERT INTO {}.{} ({}) FORMAT JSONEachRow",
            self.settings.database, table, columns
        );
        let body = serde_json::to_string(row).map_err(|e| StorageError::Query(e.to_string()))?;
        self.execute(&sql, Some(body)).await.map(|_| ())
    }
}

#[async_trait]
impl LogConnection for ClickHouseConnection {
    fn backend(&self) -> &'static str {
        "clickhouse"
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let body = self.execute("SELECT 1", None).await?;
        if body.trim() == "1" {
            Ok(())
        } else {
            Err(StorageError::Query(format!(
                "unexpected ping response '{}'",
                body.trim()
            )))
        }
    }

    async fn insert_request(&self, record: &RequestRecord) -> Result<(), StorageError> {
        self.insert_row(REQUESTS_TABLE, REQUEST_COLUMNS, record).await
    }

    async fn insert_feedback(&self, record: &FeedbackRecord) -> Result<(), StorageError> {
        self.insert_row(FEEDBACK_TABLE, FEEDBACK_COLUMNS, record).await
    }

    async fn ensure_schema(&self) -> Result<(), StorageError> {
        for statement in clickhouse_statements(&self.settings.database) {
            self.execute(&statement, None).await?;
        }
        info!(database = %self.settings.database, "ClickHouse schema ready");
        Ok(())
    }
}
