//! Analytical store config: backend choice, ClickHouse endpoint and credentials, SQLite path.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use storage::ClickHouseSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    ClickHouse,
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "clickhouse" => Ok(StoreBackend::ClickHouse),
            "sqlite" => Ok(StoreBackend::Sqlite),
            other => anyhow::bail!("STORE_BACKEND must be 'clickhouse' or 'sqlite', got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::ClickHouse => f.write_str("clickhouse"),
            StoreBackend::Sqlite => f.write_str("sqlite"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub ch_host: String,
    pub ch_port: u16,
    pub ch_user: String,
    pub ch_password: String,
    pub ch_database: String,
    pub connect_timeout_secs: u64,
    pub statement_timeout_secs: u64,
    pub sqlite_path: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let backend = env_or("STORE_BACKEND", "clickhouse").parse()?;
        Ok(Self {
            backend,
            ch_host: env_or("CH_HOST", "clickhouse-server"),
            ch_port: env_parse("CH_PORT", 8123)?,
            ch_user: env_or("CH_USER", "bot_user"),
            ch_password: env_or("CH_PASSWORD", ""),
            ch_database: env_or("CH_DB", "fakenews_db"),
            connect_timeout_secs: env_parse("CH_CONNECT_TIMEOUT_SECS", 10)?,
            statement_timeout_secs: env_parse("CH_STATEMENT_TIMEOUT_SECS", 300)?,
            sqlite_path: env_or("SQLITE_PATH", "./data/newsbot.db"),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout_secs == 0 || self.statement_timeout_secs == 0 {
            anyhow::bail!("store timeouts must be greater than zero");
        }
        if self.backend == StoreBackend::ClickHouse && self.ch_database.trim().is_empty() {
            anyhow::bail!("CH_DB must not be empty");
        }
        if self.backend == StoreBackend::Sqlite && self.sqlite_path.trim().is_empty() {
            anyhow::bail!("SQLITE_PATH must not be empty");
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }

    /// Base URL of the ClickHouse HTTP interface.
    pub fn clickhouse_url(&self) -> String {
        format!("http://{}:{}", self.ch_host, self.ch_port)
    }

    pub fn clickhouse_settings(&self) -> ClickHouseSettings {
        ClickHouseSettings {
            url: self.clickhouse_url(),
            user: self.ch_user.clone(),
            password: self.ch_password.clone(),
            database: self.ch_database.clone(),
            connect_timeout: self.connect_timeout(),
            statement_timeout: self.statement_timeout(),
        }
    }
}
