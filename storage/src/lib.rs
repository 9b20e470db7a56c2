//! Storage crate: advisory logging of analysis requests and user feedback.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`records`] – RequestRecord, FeedbackRecord, Rating
//! - [`connection`] – LogConnection and Connector traits
//! - [`clickhouse`] – ClickHouse backend over the HTTP interface
//! - [`sqlite`] – SQLite backend for local development
//! - [`handle`] – ConnectionHandle: probe / invalidate / reconnect
//! - [`gateway`] – PersistenceGateway and the AnalysisLog contract
//! - [`schema`] – DDL for both backends

mod clickhouse;
mod connection;
mod error;
mod gateway;
mod handle;
mod records;
mod schema;
mod sqlite;

pub use clickhouse::{ClickHouseConnection, ClickHouseConnector, ClickHouseSettings};
pub use connection::{Connector, LogConnection};
pub use error::StorageError;
pub use gateway::{AnalysisLog, DeliveryPolicy, PersistenceGateway};
pub use handle::{ConnectionHandle, ConnectionState};
pub use records::{FeedbackRecord, NewRequest, Rating, RequestRecord};
pub use schema::{clickhouse_statements, FEEDBACK_TABLE, REQUESTS_TABLE, SQLITE_STATEMENTS};
pub use sqlite::{SqliteConnection, SqliteConnector};
