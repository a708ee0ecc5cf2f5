//! Document-change events the notifier reacts to.
//!
//! Each variant corresponds to one trigger on the marketplace data store.
//! Events are delivered as JSON documents tagged with `kind`:
//!
//! ```json
//! { "kind": "order_status_changed", "order_id": "o1",
//!   "before": { "status": "pending" }, "after": { "status": "accepted" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, Order, Review};
use crate::types::{ChatId, MessageId, OrderId, ReviewId};

/// Union of all trigger events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerEvent {
    /// An order document was created.
    OrderCreated {
        /// Key of the new order.
        order_id: OrderId,
        /// The created document.
        order: Order,
    },
    /// A message document was created inside a chat.
    MessageCreated {
        /// Key of the parent chat.
        chat_id: ChatId,
        /// Key of the new message.
        message_id: MessageId,
        /// The created document.
        message: ChatMessage,
    },
    /// An order document was updated.
    OrderStatusChanged {
        /// Key of the updated order.
        order_id: OrderId,
        /// Snapshot before the write.
        before: Order,
        /// Snapshot after the write.
        after: Order,
    },
    /// A review document was created.
    ReviewCreated {
        /// Key of the new review.
        review_id: ReviewId,
        /// The created document.
        review: Review,
    },
}

impl TriggerEvent {
    /// Short name of the event kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "order_created",
            Self::MessageCreated { .. } => "message_created",
            Self::OrderStatusChanged { .. } => "order_status_changed",
            Self::ReviewCreated { .. } => "review_created",
        }
    }

    /// Key of the document that changed.
    pub fn document_key(&self) -> String {
        match self {
            Self::OrderCreated { order_id, .. } | Self::OrderStatusChanged { order_id, .. } => {
                format!("orders/{order_id}")
            }
            Self::MessageCreated {
                chat_id,
                message_id,
                ..
            } => format!("chats/{chat_id}/messages/{message_id}"),
            Self::ReviewCreated { review_id, .. } => format!("reviews/{review_id}"),
        }
    }

    /// Decode an event from its JSON wire form.
    pub fn from_json(payload: &str) -> crate::AppResult<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    #[test]
    fn test_decode_status_change() {
        let event = TriggerEvent::from_json(
            r#"{"kind":"order_status_changed","order_id":"o1",
                "before":{"client_id":"c1","status":"pending"},
                "after":{"client_id":"c1","status":"accepted"}}"#,
        )
        .expect("event should decode");

        match event {
            TriggerEvent::OrderStatusChanged {
                order_id, after, ..
            } => {
                assert_eq!(order_id.as_str(), "o1");
                assert_eq!(after.status, Some(OrderStatus::Accepted));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_document_key() {
        let event = TriggerEvent::MessageCreated {
            chat_id: ChatId::new("c9"),
            message_id: MessageId::new("m3"),
            message: ChatMessage::default(),
        };
        assert_eq!(event.document_key(), "chats/c9/messages/m3");
        assert_eq!(event.kind(), "message_created");
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = TriggerEvent::from_json(r#"{"kind":"user_deleted","user_id":"u1"}"#)
            .expect_err("unknown kind must fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Serialization);
    }
}
