//! DDL for the analytical store. Tables are append-only, time-ordered and partitioned by month.

pub const REQUESTS_TABLE: &str = "requests_log";
pub const FEEDBACK_TABLE: &str = "feedback";

/// ClickHouse statements for `database`, in execution order.
pub fn clickhouse_statements(database: &str) -> Vec<String> {
    vec![
        format!("CREATE DATABASE IF NOT EXISTS {}", database),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {db}.{table} (
    request_id UUID DEFAULT generateUUIDv4(),
    user_id Int64,
    chat_id Int64,
    message_id Int64,
    request_timestamp DateTime DEFAULT now(),
    news_text String,
    predicted_label String,
    prediction_probability Float32,
    model_version String DEFAULT '1.0',
    processing_time_ms UInt32
) ENGINE = MergeTree()
PARTITION BY toYYYYMM(request_timestamp)
ORDER BY (request_timestamp, user_id)"#,
            db = database,
            table = REQUESTS_TABLE
        ),
        format!(
            r#"CREATE TABLE IF NOT EXISTS {db}.{table} (
    feedback_id UUID DEFAULT generateUUIDv4(),
    request_id UUID,
    user_id Int64,
    feedback_timestamp DateTime DEFAULT now(),
    user_rating String,
    user_comment String DEFAULT ''
) ENGINE = MergeTree()
PARTITION BY toYYYYMM(feedback_timestamp)
ORDER BY (feedback_timestamp, request_id)"#,
            db = database,
            table = FEEDBACK_TABLE
        ),
    ]
}

/// SQLite equivalents, used by the development backend.
pub const SQLITE_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS requests_log (
        request_id TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL,
        chat_id INTEGER NOT NULL,
        message_id INTEGER NOT NULL,
        request_timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        news_text TEXT NOT NULL,
        predicted_label TEXT NOT NULL,
        prediction_probability REAL NOT NULL,
        model_version TEXT NOT NULL DEFAULT '1.0',
        processing_time_ms INTEGER NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_requests_log_timestamp ON requests_log(request_timestamp, user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS feedback (
        feedback_id TEXT PRIMARY KEY,
        request_id TEXT NOT NULL,
        user_id INTEGER NOT NULL,
        feedback_timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        user_rating TEXT NOT NULL,
        user_comment TEXT NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_feedback_timestamp ON feedback(feedback_timestamp, request_id)",
];
