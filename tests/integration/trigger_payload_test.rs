//! Integration tests for decoding change-feed payloads as published by
//! the database triggers.

use notifier_core::events::TriggerEvent;
use notifier_core::models::OrderStatus;
use serde_json::json;

fn decode(value: serde_json::Value) -> TriggerEvent {
    TriggerEvent::from_json(&value.to_string()).expect("payload should decode")
}

#[test]
fn test_order_insert_payload() {
    let event = decode(json!({
        "kind": "order_created",
        "order_id": "order-1",
        "order": { "client_id": "client-1", "specialist_id": null, "status": "pending" }
    }));

    match event {
        TriggerEvent::OrderCreated { order_id, order } => {
            assert_eq!(order_id.as_str(), "order-1");
            assert_eq!(order.client().map(|c| c.as_str()), Some("client-1"));
            assert!(order.specialist().is_none());
            assert_eq!(order.status, Some(OrderStatus::Pending));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_order_update_payload() {
    let event = decode(json!({
        "kind": "order_status_changed",
        "order_id": "order-1",
        "before": { "client_id": "client-1", "specialist_id": "specialist-1", "status": "accepted" },
        "after": { "client_id": "client-1", "specialist_id": "specialist-1", "status": "in_progress" }
    }));

    assert_eq!(event.kind(), "order_status_changed");
    assert_eq!(event.document_key(), "orders/order-1");
    match event {
        TriggerEvent::OrderStatusChanged { before, after, .. } => {
            assert_eq!(before.status, Some(OrderStatus::Accepted));
            assert_eq!(after.status.as_ref().map(|s| s.as_str()), Some("in_progress"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_message_insert_payload() {
    let event = decode(json!({
        "kind": "message_created",
        "chat_id": "chat-1",
        "message_id": "msg-1",
        "message": { "sender_id": "alice", "text": null }
    }));

    match event {
        TriggerEvent::MessageCreated {
            chat_id, message, ..
        } => {
            assert_eq!(chat_id.as_str(), "chat-1");
            assert_eq!(message.sender_id.map(|s| s.into_string()), Some("alice".to_string()));
            assert!(message.text.is_none());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_review_insert_payload() {
    let event = decode(json!({
        "kind": "review_created",
        "review_id": "review-1",
        "review": { "specialist_id": "specialist-1", "rating": 4.5 }
    }));

    match event {
        TriggerEvent::ReviewCreated { review, .. } => {
            assert_eq!(review.rating, Some(4.5));
            assert_eq!(review.rating_label(), "4.5");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_unknown_kind_is_rejected() {
    let payload = json!({ "kind": "user_deleted", "user_id": "u1" }).to_string();
    assert!(TriggerEvent::from_json(&payload).is_err());
}
