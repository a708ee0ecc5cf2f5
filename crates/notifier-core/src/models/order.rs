//! Order document model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Snapshot of an order document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// The client who placed the order.
    #[serde(default)]
    pub client_id: Option<UserId>,
    /// The specialist the order was placed with.
    #[serde(default)]
    pub specialist_id: Option<UserId>,
    /// Current lifecycle status.
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl Order {
    /// The specialist identifier, if present and non-blank.
    pub fn specialist(&self) -> Option<&UserId> {
        self.specialist_id.as_ref().filter(|id| !id.is_blank())
    }

    /// The client identifier, if present and non-blank.
    pub fn client(&self) -> Option<&UserId> {
        self.client_id.as_ref().filter(|id| !id.is_blank())
    }
}

/// Order lifecycle status.
///
/// Values outside the known set are preserved verbatim so they can still
/// be echoed back and compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Waiting for the specialist.
    Pending,
    /// Accepted by the specialist.
    Accepted,
    /// Work finished.
    Completed,
    /// Cancelled by either party.
    Cancelled,
    /// Any other status string.
    Other(String),
}

impl OrderStatus {
    /// Return the status as stored.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> String {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
