//! Delivery dispatcher.

use std::sync::Arc;

use tracing::info;

use notifier_core::error::AppError;
use notifier_core::models::{DeliveryReport, PushMessage};
use notifier_core::result::AppResult;
use notifier_core::traits::PushTransport;

/// Hands composed payloads to the push transport.
#[derive(Debug, Clone)]
pub struct DeliveryDispatcher {
    transport: Arc<dyn PushTransport>,
}

impl DeliveryDispatcher {
    /// Creates a dispatcher over `transport`.
    pub fn new(transport: Arc<dyn PushTransport>) -> Self {
        Self { transport }
    }

    /// Sends `message` to all of its tokens in one batch call.
    ///
    /// A transport error fails the whole dispatch. The returned report is
    /// guaranteed to hold one outcome per submitted token.
    pub async fn dispatch(&self, message: &PushMessage) -> AppResult<DeliveryReport> {
        let report = self.transport.send_batch(message).await?;

        if report.outcomes.len() != message.tokens.len() {
            return Err(AppError::external_service(format!(
                "Transport '{}' reported {} outcomes for {} tokens",
                self.transport.name(),
                report.outcomes.len(),
                message.tokens.len()
            )));
        }

        info!(
            transport = self.transport.name(),
            succeeded = report.success_count(),
            total = message.tokens.len(),
            "Notification sent"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content;
    use crate::mock::RecordingTransport;
    use crate::NotificationComposer;
    use notifier_core::error::ErrorKind;
    use notifier_core::types::OrderId;

    fn message(tokens: &[&str]) -> PushMessage {
        NotificationComposer::compose(
            content::new_order(&OrderId::new("o1"), "Ada", None),
            &tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_reports_per_token() {
        let transport = Arc::new(RecordingTransport::new());
        transport.fail_token("b");
        let dispatcher = DeliveryDispatcher::new(transport.clone());

        let report = dispatcher.dispatch(&message(&["a", "b"])).await.unwrap();
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failed_positions().collect::<Vec<_>>(), vec![1]);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_propagates_batch_failure() {
        let transport = Arc::new(RecordingTransport::new());
        transport.set_unavailable(true);
        let dispatcher = DeliveryDispatcher::new(transport);

        let err = dispatcher.dispatch(&message(&["a"])).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
