//! Results of a handler invocation.

use std::fmt;

use notifier_core::types::UserId;

/// Why a trigger completed without sending anything.
///
/// Skips are expected outcomes, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The event names no recipient (e.g. an order without a specialist).
    MissingRecipient,
    /// The chat a message belongs to does not exist.
    ChatNotFound,
    /// The chat does not have exactly one participant besides the sender.
    NoDistinctRecipient,
    /// An order update left the status as it was.
    StatusUnchanged,
    /// The new order status is not one clients are notified about.
    StatusNotNotifiable,
    /// The recipient has no profile.
    ProfileNotFound,
    /// The recipient has no registered devices.
    NoDeviceTokens,
    /// The recipient turned push notifications off.
    PushDisabled,
}

impl SkipReason {
    /// Return the reason as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRecipient => "missing_recipient",
            Self::ChatNotFound => "chat_not_found",
            Self::NoDistinctRecipient => "no_distinct_recipient",
            Self::StatusUnchanged => "status_unchanged",
            Self::StatusNotNotifiable => "status_not_notifiable",
            Self::ProfileNotFound => "profile_not_found",
            Self::NoDeviceTokens => "no_device_tokens",
            Self::PushDisabled => "push_disabled",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a completed send looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySummary {
    /// Who the notification was addressed to.
    pub recipient: UserId,
    /// Tokens submitted to the transport.
    pub attempted: usize,
    /// Tokens that accepted the message.
    pub succeeded: usize,
    /// Tokens that rejected the message.
    pub failed: usize,
    /// Tokens removed from the recipient's profile afterwards.
    pub pruned: usize,
}

/// Final, never-failing result of handling one trigger event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Nothing was sent; see the reason.
    Skipped(SkipReason),
    /// The batch was sent and the token list reconciled.
    Delivered(DeliverySummary),
    /// An internal error stopped the handler; it has been logged.
    Aborted,
}

impl HandlerOutcome {
    /// Number of tokens that accepted the notification.
    pub fn sent(&self) -> usize {
        match self {
            Self::Delivered(summary) => summary.succeeded,
            _ => 0,
        }
    }

    /// The skip reason, if the event was skipped.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}
