//! Push payloads and per-token delivery results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The `type` discriminator carried in every payload's data map.
///
/// The receiving client routes on this value: orders open the order
/// detail view, chats the conversation, specialists the profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Order created or changed.
    Order,
    /// New chat message.
    Chat,
    /// Specialist-facing events such as new reviews.
    Specialist,
}

impl NotificationType {
    /// Return the discriminator as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Chat => "chat",
            Self::Specialist => "specialist",
        }
    }

    /// Parse a discriminator value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "order" => Some(Self::Order),
            "chat" => Some(Self::Chat),
            "specialist" => Some(Self::Specialist),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A composed notification addressed to a set of device tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// String-to-string data map; always contains `type`.
    pub data: BTreeMap<String, String>,
    /// Target device tokens, in submission order.
    pub tokens: Vec<String>,
}

impl PushMessage {
    /// The `type` discriminator from the data map.
    pub fn notification_type(&self) -> Option<NotificationType> {
        self.data.get("type").and_then(|t| NotificationType::parse(t))
    }
}

/// Outcome of delivering to a single token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// Accepted by the transport.
    Delivered {
        /// Transport-assigned message name, when reported.
        message_id: Option<String>,
    },
    /// Rejected for this token.
    Failed {
        /// Transport error code (e.g. `UNREGISTERED`).
        code: String,
        /// Human-readable detail.
        message: String,
    },
}

impl DeliveryOutcome {
    /// Shorthand for a failed outcome.
    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether the token accepted the message.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Per-token results of a batch send, positionally aligned with
/// [`PushMessage::tokens`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// One outcome per submitted token.
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DeliveryReport {
    /// Create a report from ordered outcomes.
    pub fn new(outcomes: Vec<DeliveryOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of successful deliveries.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed deliveries.
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Positions of the tokens that failed.
    pub fn failed_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.is_success())
            .map(|(idx, _)| idx)
    }
}
