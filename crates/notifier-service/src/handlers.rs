//! Trigger handlers.
//!
//! Every handler runs the same pipeline: resolve, compose, dispatch,
//! reconcile. Handlers never return an error; internal failures are
//! logged and reported as [`HandlerOutcome::Aborted`].

use std::sync::Arc;

use tracing::{error, info, instrument};

use notifier_core::events::TriggerEvent;
use notifier_core::models::{ChatMessage, Order, Review};
use notifier_core::result::AppResult;
use notifier_core::traits::{ChatStore, ProfileStore, PushTransport};
use notifier_core::types::{ChatId, MessageId, OrderId, ReviewId};

use crate::composer::NotificationComposer;
use crate::dispatcher::DeliveryDispatcher;
use crate::outcome::{DeliverySummary, HandlerOutcome};
use crate::profiles::ProfileAccessor;
use crate::reconciler::TokenReconciler;
use crate::resolver::{RecipientResolver, Resolution};

/// Entry points for the four marketplace triggers.
#[derive(Debug, Clone)]
pub struct NotificationHandlers {
    resolver: RecipientResolver,
    dispatcher: DeliveryDispatcher,
    reconciler: TokenReconciler,
}

impl NotificationHandlers {
    /// Wire the handlers to their collaborators.
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        chats: Arc<dyn ChatStore>,
        transport: Arc<dyn PushTransport>,
    ) -> Self {
        Self {
            resolver: RecipientResolver::new(ProfileAccessor::new(profiles.clone()), chats),
            dispatcher: DeliveryDispatcher::new(transport),
            reconciler: TokenReconciler::new(profiles),
        }
    }

    /// A new order was placed; notify its specialist.
    pub async fn on_order_created(&self, order_id: OrderId, order: Order) -> HandlerOutcome {
        self.handle(&TriggerEvent::OrderCreated { order_id, order })
            .await
    }

    /// A chat message was posted; notify the other participant.
    pub async fn on_message_created(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: ChatMessage,
    ) -> HandlerOutcome {
        self.handle(&TriggerEvent::MessageCreated {
            chat_id,
            message_id,
            message,
        })
        .await
    }

    /// An order was updated; notify the client of notable status changes.
    pub async fn on_order_status_changed(
        &self,
        order_id: OrderId,
        before: Order,
        after: Order,
    ) -> HandlerOutcome {
        self.handle(&TriggerEvent::OrderStatusChanged {
            order_id,
            before,
            after,
        })
        .await
    }

    /// A review was left; notify the reviewed specialist.
    pub async fn on_review_created(&self, review_id: ReviewId, review: Review) -> HandlerOutcome {
        self.handle(&TriggerEvent::ReviewCreated { review_id, review })
            .await
    }

    /// Handle any trigger event.
    #[instrument(skip(self, event), fields(kind = event.kind(), document = %event.document_key()))]
    pub async fn handle(&self, event: &TriggerEvent) -> HandlerOutcome {
        match self.process(event).await {
            Ok(HandlerOutcome::Skipped(reason)) => {
                info!(%reason, "Notification skipped");
                HandlerOutcome::Skipped(reason)
            }
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "Notification handler failed");
                HandlerOutcome::Aborted
            }
        }
    }

    async fn process(&self, event: &TriggerEvent) -> AppResult<HandlerOutcome> {
        let recipient = match self.resolver.resolve(event).await? {
            Resolution::Notify(recipient) => recipient,
            Resolution::Skip(reason) => return Ok(HandlerOutcome::Skipped(reason)),
        };

        let message =
            NotificationComposer::compose(recipient.content, &recipient.profile.device_tokens)?;
        let report = self.dispatcher.dispatch(&message).await?;
        // A failed prune leaves stale tokens for the next send.
        let pruned = match self
            .reconciler
            .reconcile(&recipient.profile.id, &message.tokens, &report)
            .await
        {
            Ok(pruned) => pruned,
            Err(e) => {
                error!(
                    user_id = %recipient.profile.id,
                    error = %e,
                    "Failed to prune device tokens"
                );
                0
            }
        };

        Ok(HandlerOutcome::Delivered(DeliverySummary {
            recipient: recipient.profile.id,
            attempted: message.tokens.len(),
            succeeded: report.success_count(),
            failed: report.failure_count(),
            pruned,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notifier_core::types::UserId;

    use crate::mock::{InMemoryChatStore, InMemoryProfileStore, RecordingTransport};
    use crate::outcome::SkipReason;

    struct Fixture {
        profiles: Arc<InMemoryProfileStore>,
        transport: Arc<RecordingTransport>,
        handlers: NotificationHandlers,
    }

    fn fixture() -> Fixture {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let transport = Arc::new(RecordingTransport::new());
        let handlers = NotificationHandlers::new(
            profiles.clone(),
            Arc::new(InMemoryChatStore::new()),
            transport.clone(),
        );
        Fixture {
            profiles,
            transport,
            handlers,
        }
    }

    fn review_for(specialist: &str) -> Review {
        Review {
            specialist_id: Some(UserId::new(specialist)),
            rating: Some(4.5),
        }
    }

    #[tokio::test]
    async fn test_review_delivered_and_failed_token_pruned() {
        let fx = fixture();
        fx.profiles
            .insert(InMemoryProfileStore::profile("s1", None, &["A", "B", "C"]));
        fx.transport.fail_token("B");

        let outcome = fx
            .handlers
            .on_review_created(ReviewId::new("r1"), review_for("s1"))
            .await;

        assert_eq!(
            outcome,
            HandlerOutcome::Delivered(DeliverySummary {
                recipient: UserId::new("s1"),
                attempted: 3,
                succeeded: 2,
                failed: 1,
                pruned: 1,
            })
        );
        assert_eq!(
            fx.profiles.get_profile("s1").unwrap().device_tokens,
            vec!["A".to_string(), "C".to_string()]
        );

        let sent = fx.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "You received a review: 4.5 ⭐");
    }

    #[tokio::test]
    async fn test_skip_sends_nothing() {
        let fx = fixture();
        let outcome = fx
            .handlers
            .on_review_created(ReviewId::new("r1"), review_for("ghost"))
            .await;

        assert_eq!(outcome.skip_reason(), Some(SkipReason::ProfileNotFound));
        assert!(fx.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_prune_failure_still_reports_delivery() {
        let fx = fixture();
        fx.profiles
            .insert(InMemoryProfileStore::profile("s1", None, &["A", "B"]));
        fx.profiles.fail_writes(true);
        fx.transport.fail_token("B");

        let outcome = fx
            .handlers
            .on_review_created(ReviewId::new("r1"), review_for("s1"))
            .await;

        assert_eq!(
            outcome,
            HandlerOutcome::Delivered(DeliverySummary {
                recipient: UserId::new("s1"),
                attempted: 2,
                succeeded: 1,
                failed: 1,
                pruned: 0,
            })
        );
        assert_eq!(
            fx.profiles.get_profile("s1").unwrap().device_tokens,
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_without_pruning() {
        let fx = fixture();
        fx.profiles
            .insert(InMemoryProfileStore::profile("s1", None, &["A"]));
        fx.transport.set_unavailable(true);

        let outcome = fx
            .handlers
            .on_review_created(ReviewId::new("r1"), review_for("s1"))
            .await;

        assert_eq!(outcome, HandlerOutcome::Aborted);
        assert!(fx.profiles.token_writes().is_empty());
    }
}
