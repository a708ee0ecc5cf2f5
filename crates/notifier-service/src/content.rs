//! Notification texts and data maps for each event kind.
//!
//! Every function here is pure; names are looked up by the resolver
//! before these are called.

use std::collections::BTreeMap;

use notifier_core::models::{NotificationType, OrderStatus};
use notifier_core::types::{ChatId, MessageId, OrderId, ReviewId, UserId};

/// Name shown when the ordering client's name is unavailable.
pub const DEFAULT_CLIENT_NAME: &str = "Client";
/// Name shown when a message sender's name is unavailable.
pub const DEFAULT_SENDER_NAME: &str = "User";
/// Body used for messages without text.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "New message";
/// Maximum characters of message text shown in a notification.
pub const PREVIEW_MAX_CHARS: usize = 50;
/// Marker appended to clipped previews.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Title, body, and data of a notification, before it is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Data map; always holds `type`.
    pub data: BTreeMap<String, String>,
}

impl NotificationContent {
    fn new(kind: NotificationType, title: impl Into<String>, body: impl Into<String>) -> Self {
        let mut data = BTreeMap::new();
        data.insert("type".to_string(), kind.as_str().to_string());
        Self {
            title: title.into(),
            body: body.into(),
            data,
        }
    }

    fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// New order, addressed to the specialist.
pub fn new_order(order_id: &OrderId, client_name: &str, status: Option<&OrderStatus>) -> NotificationContent {
    let status = status.map(OrderStatus::as_str).unwrap_or("pending");
    NotificationContent::new(
        NotificationType::Order,
        "New order!",
        format!("You have a new order from {client_name}"),
    )
    .with("orderId", order_id.as_str())
    .with("status", status)
}

/// New chat message, addressed to the other participant.
pub fn new_message(
    chat_id: &ChatId,
    message_id: &MessageId,
    sender_id: &UserId,
    sender_name: &str,
    text: Option<&str>,
) -> NotificationContent {
    NotificationContent::new(NotificationType::Chat, sender_name, message_preview(text))
        .with("chatId", chat_id.as_str())
        .with("senderId", sender_id.as_str())
        .with("messageId", message_id.as_str())
}

/// Order status change, addressed to the client.
///
/// Returns `None` for statuses clients are not notified about. A
/// cancellation only reaches the client, not the specialist.
pub fn order_status(order_id: &OrderId, status: &OrderStatus) -> Option<NotificationContent> {
    let (title, body) = match status {
        OrderStatus::Accepted => ("Order accepted!", "A specialist accepted your order"),
        OrderStatus::Completed => ("Order completed!", "Your order has been completed"),
        OrderStatus::Cancelled => ("Order cancelled", "The order was cancelled"),
        OrderStatus::Pending | OrderStatus::Other(_) => return None,
    };

    Some(
        NotificationContent::new(NotificationType::Order, title, body)
            .with("orderId", order_id.as_str())
            .with("status", status.as_str()),
    )
}

/// New review, addressed to the reviewed specialist.
pub fn new_review(specialist_id: &UserId, review_id: &ReviewId, rating: &str) -> NotificationContent {
    NotificationContent::new(
        NotificationType::Specialist,
        "New review!",
        format!("You received a review: {rating} ⭐"),
    )
    .with("specialistId", specialist_id.as_str())
    .with("reviewId", review_id.as_str())
    .with("action", "new_review")
}

/// Message text as shown in a notification body.
///
/// Missing or blank text becomes the placeholder; text longer than
/// [`PREVIEW_MAX_CHARS`] characters is clipped and marked.
pub fn message_preview(text: Option<&str>) -> String {
    let text = match text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return EMPTY_MESSAGE_PLACEHOLDER.to_string(),
    };

    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => format!("{}{PREVIEW_ELLIPSIS}", &text[..cut]),
        None => text.to_string(),
    }
}
