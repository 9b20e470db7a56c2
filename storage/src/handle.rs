//! The single logical store connection of the process.
//!
//! Every logging call goes through [`ConnectionHandle::ensure_connected`]: if there is no connection,
//! or the liveness probe on the current one fails, the connection is discarded and a new one is
//! established within the connect timeout. Concurrent callers share the slot; two of them may both
//! reconnect after the same probe failure, and the later connection simply replaces the earlier.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::connection::{Connector, LogConnection};
use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

pub struct ConnectionHandle {
    connector: Arc<dyn Connector>,
    connect_timeout: Duration,
    slot: RwLock<Option<Arc<dyn LogConnection>>>,
}

impl ConnectionHandle {
    /// Starts disconnected; nothing is opened until the first call.
    pub fn new(connector: Arc<dyn Connector>, connect_timeout: Duration) -> Self {
        Self {
            connector,
            connect_timeout,
            slot: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> ConnectionState {
        if self.slot.read().await.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Pings the current connection. `false` when disconnected or the probe fails.
    pub async fn probe(&self) -> bool {
        let current = self.slot.read().await.clone();
        match current {
            Some(connection) => connection.ping().await.is_ok(),
            None => false,
        }
    }

    /// Drops the current connection; the next call reconnects.
    pub async fn invalidate(&self) {
        if self.slot.write().await.take().is_some() {
            info!(store = %self.connector.describe(), "Store connection discarded");
        }
    }

    /// Discards `stale` only if it is still the current connection.
    async fn discard(&self, stale: &Arc<dyn LogConnection>) {
        let mut slot = self.slot.write().await;
        if slot.as_ref().is_some_and(|c| Arc::ptr_eq(c, stale)) {
            *slot = None;
        }
    }

    /// Returns a live connection, reconnecting if needed. On failure the handle stays disconnected.
    pub async fn ensure_connected(&self) -> Result<Arc<dyn LogConnection>, StorageError> {
        let current = self.slot.read().await.clone();
        if let Some(connection) = current {
            match connection.ping().await {
                Ok(()) => return Ok(connection),
                Err(e) => {
                    warn!(error = %e, backend = connection.backend(), "Store probe failed, reconnecting");
                    self.discard(&connection).await;
                }
            }
        }

        let store = self.connector.describe();
        let connection = match tokio::time::timeout(self.connect_timeout, self.connector.connect())
            .await
        {
            Ok(Ok(connection)) => connection,
            Ok(Err(e)) => {
                error!(store = %store, error = %e, "Store connection failed");
                return Err(e);
            }
            Err(_) => {
                error!(store = %store, timeout = ?self.connect_timeout, "Store connection timed out");
                return Err(StorageError::Timeout(format!(
                    "connecting to {} took longer than {:?}",
                    store, self.connect_timeout
                )));
            }
        };
        info!(store = %store, "Store connection established");
        *self.slot.write().await = Some(connection.clone());
        Ok(connection)
    }
}
