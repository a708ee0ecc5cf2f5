//! Shared test helpers for integration tests.

use std::sync::Arc;

use notifier_core::models::{
    ChatMessage, NotificationPreferences, Order, OrderStatus, PushMessage, Review, UserProfile,
};
use notifier_core::types::{ChatId, MessageId, OrderId, ReviewId, UserId};
use notifier_service::mock::{InMemoryChatStore, InMemoryProfileStore, RecordingTransport};
use notifier_service::{HandlerOutcome, NotificationHandlers};

/// Test application context backed by in-memory collaborators
pub struct TestApp {
    /// Profile store shared with the handlers
    pub profiles: Arc<InMemoryProfileStore>,
    /// Chat store shared with the handlers
    pub chats: Arc<InMemoryChatStore>,
    /// Transport recording every batch
    pub transport: Arc<RecordingTransport>,
    /// Handlers under test
    pub handlers: NotificationHandlers,
}

impl TestApp {
    /// Create a new test application with empty stores
    pub fn new() -> Self {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let chats = Arc::new(InMemoryChatStore::new());
        let transport = Arc::new(RecordingTransport::new());
        let handlers = NotificationHandlers::new(profiles.clone(), chats.clone(), transport.clone());

        Self {
            profiles,
            chats,
            transport,
            handlers,
        }
    }

    /// Register a user with a name and device tokens
    pub fn create_user(&self, id: &str, name: Option<&str>, tokens: &[&str]) {
        self.profiles
            .insert(InMemoryProfileStore::profile(id, name, tokens));
    }

    /// Register a user who switched push notifications off
    pub fn create_muted_user(&self, id: &str, tokens: &[&str]) {
        let profile = UserProfile {
            notification_preferences: NotificationPreferences::with_push(false),
            ..InMemoryProfileStore::profile(id, None, tokens)
        };
        self.profiles.insert(profile);
    }

    /// Every batch handed to the transport
    pub fn sent(&self) -> Vec<PushMessage> {
        self.transport.sent()
    }

    /// Current device tokens of a user
    pub fn tokens_of(&self, id: &str) -> Vec<String> {
        self.profiles
            .get_profile(id)
            .map(|p| p.device_tokens)
            .unwrap_or_default()
    }

    /// Create an order between a client and an optional specialist
    pub async fn create_order(
        &self,
        order_id: &str,
        client: &str,
        specialist: Option<&str>,
    ) -> HandlerOutcome {
        self.handlers
            .on_order_created(OrderId::new(order_id), order(client, specialist, Some("pending")))
            .await
    }

    /// Move an order from one status to another
    pub async fn change_status(&self, client: &str, from: &str, to: &str) -> HandlerOutcome {
        self.handlers
            .on_order_status_changed(
                OrderId::new("order-1"),
                order(client, Some("specialist-1"), Some(from)),
                order(client, Some("specialist-1"), Some(to)),
            )
            .await
    }

    /// Post a message into a chat
    pub async fn post_message(&self, chat: &str, sender: &str, text: Option<&str>) -> HandlerOutcome {
        self.handlers
            .on_message_created(
                ChatId::new(chat),
                MessageId::new("msg-1"),
                ChatMessage {
                    sender_id: Some(UserId::new(sender)),
                    text: text.map(str::to_string),
                },
            )
            .await
    }

    /// Leave a review for a specialist
    pub async fn leave_review(&self, specialist: &str, rating: Option<f64>) -> HandlerOutcome {
        self.handlers
            .on_review_created(
                ReviewId::new("review-1"),
                Review {
                    specialist_id: Some(UserId::new(specialist)),
                    rating,
                },
            )
            .await
    }
}

/// Build an order snapshot
pub fn order(client: &str, specialist: Option<&str>, status: Option<&str>) -> Order {
    Order {
        client_id: Some(UserId::new(client)),
        specialist_id: specialist.map(UserId::new),
        status: status.map(OrderStatus::from),
    }
}
