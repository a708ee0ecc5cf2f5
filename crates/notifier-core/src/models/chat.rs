//! Chat and chat message models.

use serde::{Deserialize, Serialize};

use crate::types::{ChatId, UserId};

/// A two-party conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    /// Unique chat identifier.
    pub id: ChatId,
    /// The participants of the conversation.
    #[serde(default)]
    pub participants: Vec<UserId>,
}

impl Chat {
    /// The single participant other than `sender`.
    ///
    /// Returns `None` unless exactly one distinct participant differs from
    /// the sender.
    pub fn counterpart_of(&self, sender: Option<&UserId>) -> Option<&UserId> {
        let mut others = self
            .participants
            .iter()
            .filter(|p| !p.is_blank() && Some(*p) != sender);

        let first = others.next()?;
        if others.any(|p| p != first) {
            return None;
        }
        Some(first)
    }
}

/// Snapshot of a newly created chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    #[serde(default)]
    pub sender_id: Option<UserId>,
    /// Message text.
    #[serde(default)]
    pub text: Option<String>,
}
