//! Backend seams: a live connection to the analytical store and the factory that opens one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::records::{FeedbackRecord, RequestRecord};

/// A live handle to the store. Every call is a single statement with a bounded timeout.
#[async_trait]
pub trait LogConnection: Send + Sync {
    /// Backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Liveness probe (`SELECT 1`).
    async fn ping(&self) -> Result<(), StorageError>;

    /// Single-row insert into `requests_log`.
    async fn insert_request(&self, record: &RequestRecord) -> Result<(), StorageError>;

    /// Single-row insert into `feedback`.
    async fn insert_feedback(&self, record: &FeedbackRecord) -> Result<(), StorageError>;

    /// Creates the database and both tables if missing.
    async fn ensure_schema(&self) -> Result<(), StorageError>;
}

/// Opens new connections for [`ConnectionHandle`](crate::ConnectionHandle).
#[async_trait]
pub trait Connector: Send + Sync {
    /// Where this connector points, for logs. Never includes credentials.
    fn describe(&self) -> String;

    async fn connect(&self) -> Result<Arc<dyn LogConnection>, StorageError>;
}
