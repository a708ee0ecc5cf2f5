//! Integration tests for the notification handlers.

mod helpers;

use notifier_service::{HandlerOutcome, SkipReason};

#[tokio::test]
async fn test_new_order_notifies_specialist() {
    let app = helpers::TestApp::new();
    app.create_user("specialist-1", Some("Sam"), &["specialist-phone"]);
    app.create_user("client-1", Some("Ada"), &[]);

    let outcome = app.create_order("order-1", "client-1", Some("specialist-1")).await;
    assert_eq!(outcome.sent(), 1);

    let sent = app.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "New order!");
    assert_eq!(sent[0].body, "You have a new order from Ada");
    assert_eq!(sent[0].tokens, vec!["specialist-phone".to_string()]);
    assert_eq!(sent[0].data["type"], "order");
    assert_eq!(sent[0].data["orderId"], "order-1");
    assert_eq!(sent[0].data["status"], "pending");
}

#[tokio::test]
async fn test_order_without_specialist_sends_nothing() {
    let app = helpers::TestApp::new();
    app.create_user("client-1", Some("Ada"), &["client-phone"]);

    let outcome = app.create_order("order-1", "client-1", None).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::MissingRecipient));
    assert!(app.sent().is_empty());
}

#[tokio::test]
async fn test_unreadable_client_name_uses_default() {
    let app = helpers::TestApp::new();
    app.create_user("specialist-1", None, &["specialist-phone"]);
    app.create_user("client-1", Some("Ada"), &[]);
    app.profiles.fail_lookups_for("client-1");

    let outcome = app.create_order("order-1", "client-1", Some("specialist-1")).await;
    assert_eq!(outcome.sent(), 1);
    assert_eq!(app.sent()[0].body, "You have a new order from Client");
}

#[tokio::test]
async fn test_status_unchanged_sends_nothing() {
    let app = helpers::TestApp::new();
    app.create_user("client-1", None, &["client-phone"]);

    let outcome = app.change_status("client-1", "accepted", "accepted").await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::StatusUnchanged));
    assert!(app.sent().is_empty());
}

#[tokio::test]
async fn test_unlisted_status_sends_nothing() {
    let app = helpers::TestApp::new();
    app.create_user("client-1", None, &["client-phone"]);

    for status in ["pending", "in_progress", "disputed"] {
        let outcome = app.change_status("client-1", "accepted", status).await;
        assert_eq!(outcome.skip_reason(), Some(SkipReason::StatusNotNotifiable));
    }
    assert!(app.sent().is_empty());
}

#[tokio::test]
async fn test_status_changes_notify_client() {
    let app = helpers::TestApp::new();
    app.create_user("client-1", None, &["client-phone"]);

    app.change_status("client-1", "pending", "accepted").await;
    app.change_status("client-1", "accepted", "completed").await;
    app.change_status("client-1", "completed", "cancelled").await;

    let titles: Vec<String> = app.sent().into_iter().map(|m| m.title).collect();
    assert_eq!(titles, vec!["Order accepted!", "Order completed!", "Order cancelled"]);
    assert!(app.sent().iter().all(|m| m.data["orderId"] == "order-1"));
}

#[tokio::test]
async fn test_message_reaches_other_participant() {
    let app = helpers::TestApp::new();
    app.create_user("alice", Some("Alice"), &["alice-phone"]);
    app.create_user("bob", Some("Bob"), &["bob-phone"]);
    app.chats.insert("chat-1", &["alice", "bob"]);

    let outcome = app.post_message("chat-1", "alice", Some("See you at 5")).await;
    assert_eq!(outcome.sent(), 1);

    let sent = app.sent();
    assert_eq!(sent[0].tokens, vec!["bob-phone".to_string()]);
    assert_eq!(sent[0].title, "Alice");
    assert_eq!(sent[0].body, "See you at 5");
    assert_eq!(sent[0].data["type"], "chat");
    assert_eq!(sent[0].data["chatId"], "chat-1");
    assert_eq!(sent[0].data["senderId"], "alice");
    assert_eq!(sent[0].data["messageId"], "msg-1");
}

#[tokio::test]
async fn test_message_preview_is_clipped() {
    let app = helpers::TestApp::new();
    app.create_user("alice", None, &["alice-phone"]);
    app.create_user("bob", None, &["bob-phone"]);
    app.chats.insert("chat-1", &["alice", "bob"]);

    let long = "x".repeat(60);
    app.post_message("chat-1", "alice", Some(&long)).await;
    let short = "y".repeat(40);
    app.post_message("chat-1", "alice", Some(&short)).await;
    app.post_message("chat-1", "alice", None).await;

    let bodies: Vec<String> = app.sent().into_iter().map(|m| m.body).collect();
    assert_eq!(bodies[0], format!("{}...", "x".repeat(50)));
    assert_eq!(bodies[1], short);
    assert_eq!(bodies[2], "New message");
    assert!(app.sent().iter().all(|m| m.title == "User"));
}

#[tokio::test]
async fn test_degenerate_chat_sends_nothing() {
    let app = helpers::TestApp::new();
    app.create_user("alice", None, &["alice-phone"]);
    app.chats.insert("solo", &["alice", "alice"]);
    app.chats.insert("crowd", &["alice", "bob", "carol"]);

    let outcome = app.post_message("solo", "alice", Some("hi")).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoDistinctRecipient));
    let outcome = app.post_message("crowd", "alice", Some("hi")).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoDistinctRecipient));
    let outcome = app.post_message("missing", "alice", Some("hi")).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::ChatNotFound));
    assert!(app.sent().is_empty());
}

#[tokio::test]
async fn test_review_scenario() {
    let app = helpers::TestApp::new();
    app.create_user("specialist-1", None, &["specialist-phone"]);

    app.leave_review("specialist-1", Some(5.0)).await;
    app.leave_review("specialist-1", None).await;

    let sent = app.sent();
    assert_eq!(sent[0].title, "New review!");
    assert_eq!(sent[0].body, "You received a review: 5 ⭐");
    assert_eq!(sent[0].data["type"], "specialist");
    assert_eq!(sent[0].data["specialistId"], "specialist-1");
    assert_eq!(sent[0].data["reviewId"], "review-1");
    assert_eq!(sent[0].data["action"], "new_review");
    assert_eq!(sent[1].body, "You received a review: 0 ⭐");
}

#[tokio::test]
async fn test_failed_token_is_pruned_in_order() {
    let app = helpers::TestApp::new();
    app.create_user("specialist-1", None, &["A", "B", "C"]);
    app.transport.fail_token("B");

    let outcome = app.leave_review("specialist-1", Some(4.0)).await;
    match outcome {
        HandlerOutcome::Delivered(summary) => {
            assert_eq!(summary.attempted, 3);
            assert_eq!(summary.succeeded, 2);
            assert_eq!(summary.pruned, 1);
        }
        other => panic!("expected delivery, got {other:?}"),
    }
    assert_eq!(app.tokens_of("specialist-1"), vec!["A".to_string(), "C".to_string()]);
}

#[tokio::test]
async fn test_all_delivered_means_no_write() {
    let app = helpers::TestApp::new();
    app.create_user("specialist-1", None, &["A", "B"]);

    app.leave_review("specialist-1", Some(3.0)).await;
    assert!(app.profiles.token_writes().is_empty());
    assert_eq!(app.tokens_of("specialist-1"), vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn test_guards_stop_delivery() {
    let app = helpers::TestApp::new();
    app.create_user("no-devices", Some("Nia"), &[]);
    app.create_muted_user("muted", &["muted-phone"]);

    let outcome = app.leave_review("no-devices", Some(5.0)).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoDeviceTokens));
    let outcome = app.leave_review("muted", Some(5.0)).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::PushDisabled));
    let outcome = app.leave_review("ghost", Some(5.0)).await;
    assert_eq!(outcome.skip_reason(), Some(SkipReason::ProfileNotFound));
    assert!(app.sent().is_empty());
}

#[tokio::test]
async fn test_transport_outage_aborts_quietly() {
    let app = helpers::TestApp::new();
    app.create_user("specialist-1", None, &["A", "B"]);
    app.transport.set_unavailable(true);

    let outcome = app.leave_review("specialist-1", Some(5.0)).await;
    assert_eq!(outcome, HandlerOutcome::Aborted);
    assert_eq!(app.tokens_of("specialist-1"), vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn test_chat_store_outage_aborts() {
    let app = helpers::TestApp::new();
    app.create_user("bob", None, &["bob-phone"]);
    app.chats.set_unavailable(true);

    let outcome = app.post_message("chat-1", "alice", Some("hi")).await;
    assert_eq!(outcome, HandlerOutcome::Aborted);
    assert!(app.sent().is_empty());
}
