//! Storage error types.
//!
//! Returned by connections and the connection handle; the gateway logs and swallows them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("Invalid request id: {0}")]
    InvalidRequestId(String),
    #[error("Unknown rating: {0}")]
    InvalidRating(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut => StorageError::Timeout(e.to_string()),
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed => {
                StorageError::Connect(e.to_string())
            }
            other => StorageError::Query(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StorageError::Timeout(e.to_string())
        } else if e.is_connect() {
            StorageError::Connect(e.to_string())
        } else {
            StorageError::Query(e.to_string())
        }
    }
}
