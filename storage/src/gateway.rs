//! Persistence gateway: advisory logging of requests and feedback.
//!
//! Both operations are attempted exactly once. Failures are logged and swallowed; the caller only
//! learns whether the row was written.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::connection::Connector;
use crate::error::StorageError;
use crate::handle::{ConnectionHandle, ConnectionState};
use crate::records::{FeedbackRecord, NewRequest, Rating, RequestRecord};

/// How an [`AnalysisLog`] delivers rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// At most one write per call: no retry, no queue, failures are dropped.
    SingleAttempt,
}

/// Sink for analysis requests and user feedback.
#[async_trait]
pub trait AnalysisLog: Send + Sync {
    fn delivery_policy(&self) -> DeliveryPolicy;

    /// Mints a fresh request id and writes the request. Returns the id only if the row was written.
    async fn log_request(&self, request: NewRequest) -> Option<Uuid>;

    /// Writes feedback for `request_id` (textual UUID). An unparsable id returns `false` without a write.
    async fn log_feedback(&self, request_id: &str, user_id: i64, rating: Rating) -> bool;
}

pub struct PersistenceGateway {
    handle: ConnectionHandle,
}

impl PersistenceGateway {
    pub fn new(connector: Arc<dyn Connector>, connect_timeout: Duration) -> Self {
        Self {
            handle: ConnectionHandle::new(connector, connect_timeout),
        }
    }

    pub fn handle(&self) -> &ConnectionHandle {
        &self.handle
    }

    pub async fn state(&self) -> ConnectionState {
        self.handle.state().await
    }

    /// Tries to connect once; used at startup to report store availability.
    pub async fn check_connection(&self) -> bool {
        self.handle.ensure_connected().await.is_ok()
    }

    /// Creates the database and tables on the configured backend.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        let connection = self.handle.ensure_connected().await?;
        connection.ensure_schema().await
    }
}

#[async_trait]
impl AnalysisLog for PersistenceGateway {
    fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy::SingleAttempt
    }

    #[instrument(skip(self, request), fields(user_id = request.user_id, chat_id = request.chat_id))]
    async fn log_request(&self, request: NewRequest) -> Option<Uuid> {
        let connection = match self.handle.ensure_connected().await {
            Ok(connection) => connection,
            Err(e) => {
                error!(error = %e, "Store unavailable, request not logged");
                return None;
            }
        };

        let request_id = Uuid::new_v4();
        let record = RequestRecord::new(request_id, request);
        match connection.insert_request(&record).await {
            Ok(()) => {
                info!(
                    request_id = %request_id,
                    label = %record.predicted_label,
                    model = %record.model_version,
                    "Request logged"
                );
                Some(request_id)
            }
            Err(e) => {
                error!(request_id = %request_id, error = %e, "Failed to log request");
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn log_feedback(&self, request_id: &str, user_id: i64, rating: Rating) -> bool {
        let request_id = match Uuid::parse_str(request_id) {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    error = %StorageError::InvalidRequestId(e.to_string()),
                    "Feedback rejected"
                );
                return false;
            }
        };

        let connection = match self.handle.ensure_connected().await {
            Ok(connection) => connection,
            Err(e) => {
                error!(error = %e, "Store unavailable, feedback not logged");
                return false;
            }
        };

        let record = FeedbackRecord {
            request_id,
            user_id,
            user_rating: rating,
        };
        match connection.insert_feedback(&record).await {
            Ok(()) => {
                info!(request_id = %request_id, "Feedback logged");
                true
            }
            Err(e) => {
                error!(request_id = %request_id, error = %e, "Failed to log feedback");
                false
            }
        }
    }
}
