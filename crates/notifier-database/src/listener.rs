//! Change-event feed over PostgreSQL LISTEN/NOTIFY.
//!
//! The triggers installed by the migrations publish one JSON document per
//! changed row. This listener decodes them into [`TriggerEvent`]s.

use sqlx::postgres::PgListener;
use tracing::{debug, info, warn};

use notifier_core::error::{AppError, ErrorKind};
use notifier_core::events::TriggerEvent;
use notifier_core::result::AppResult;

use crate::connection::DatabasePool;

/// Subscribes to the change channel and yields decoded trigger events.
pub struct TriggerListener {
    listener: PgListener,
    channel: String,
}

impl std::fmt::Debug for TriggerListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerListener")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl TriggerListener {
    /// Open a dedicated connection and `LISTEN` on `channel`.
    pub async fn connect(pool: &DatabasePool, channel: &str) -> AppResult<Self> {
        let mut listener = PgListener::connect_with(pool.pool()).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open listener connection", e)
        })?;

        listener.listen(channel).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to LISTEN on '{channel}'"),
                e,
            )
        })?;

        info!(channel, "Listening for change events");
        Ok(Self {
            listener,
            channel: channel.to_string(),
        })
    }

    /// Channel this listener is subscribed to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Wait for the next decodable event.
    ///
    /// Payloads that do not decode are logged and skipped. Connection loss
    /// is retried by the underlying listener; events published while
    /// disconnected are not replayed.
    pub async fn next_event(&mut self) -> AppResult<TriggerEvent> {
        loop {
            let notification = self.listener.recv().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Change feed receive failed", e)
            })?;

            match TriggerEvent::from_json(notification.payload()) {
                Ok(event) => {
                    debug!(kind = event.kind(), key = %event.document_key(), "Change event received");
                    return Ok(event);
                }
                Err(e) => {
                    warn!(
                        channel = notification.channel(),
                        error = %e,
                        "Dropping undecodable change event"
                    );
                }
            }
        }
    }
}
