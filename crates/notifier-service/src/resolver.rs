//! Recipient resolver.
//!
//! One resolver covers all four trigger kinds. Each kind only decides who
//! the recipient is and what the notification says; the guard sequence and
//! the soft name lookups are shared.

use std::sync::Arc;

use tracing::debug;

use notifier_core::events::TriggerEvent;
use notifier_core::models::{ChatMessage, Order, OrderStatus, Review, UserProfile};
use notifier_core::result::AppResult;
use notifier_core::traits::ChatStore;
use notifier_core::types::{ChatId, MessageId, OrderId, ReviewId, UserId};

use crate::content::{self, NotificationContent};
use crate::guard;
use crate::outcome::SkipReason;
use crate::profiles::ProfileAccessor;

/// A recipient that passed every guard, with the content to send them.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    /// The recipient's profile as read during resolution.
    pub profile: UserProfile,
    /// What to send.
    pub content: NotificationContent,
}

/// Outcome of resolving one trigger event.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Send `content` to the recipient's devices.
    Notify(Recipient),
    /// Send nothing.
    Skip(SkipReason),
}

/// Content that still needs display names before it can be rendered.
#[derive(Debug)]
enum Draft {
    NewOrder {
        order_id: OrderId,
        client_id: Option<UserId>,
        status: Option<OrderStatus>,
    },
    NewMessage {
        chat_id: ChatId,
        message_id: MessageId,
        sender_id: UserId,
        text: Option<String>,
    },
    Ready(NotificationContent),
}

/// Who to notify and with what.
#[derive(Debug)]
struct Target {
    recipient: UserId,
    draft: Draft,
}

/// Determines the recipient and content for trigger events.
#[derive(Debug, Clone)]
pub struct RecipientResolver {
    profiles: ProfileAccessor,
    chats: Arc<dyn ChatStore>,
}

impl RecipientResolver {
    /// Creates a resolver reading through `profiles` and `chats`.
    pub fn new(profiles: ProfileAccessor, chats: Arc<dyn ChatStore>) -> Self {
        Self { profiles, chats }
    }

    /// Resolves `event` to a guarded recipient and rendered content, or a skip.
    ///
    /// Errors from the recipient and chat lookups propagate; display name
    /// lookups never fail.
    pub async fn resolve(&self, event: &TriggerEvent) -> AppResult<Resolution> {
        let target = match self.target(event).await? {
            Ok(target) => target,
            Err(reason) => return Ok(Resolution::Skip(reason)),
        };

        let profile = match guard::check_recipient(self.profiles.recipient(&target.recipient).await?) {
            Ok(profile) => profile,
            Err(reason) => {
                debug!(recipient = %target.recipient, %reason, "Recipient failed guard");
                return Ok(Resolution::Skip(reason));
            }
        };

        let content = self.render(target.draft).await;
        Ok(Resolution::Notify(Recipient { profile, content }))
    }

    async fn target(&self, event: &TriggerEvent) -> AppResult<Result<Target, SkipReason>> {
        match event {
            TriggerEvent::OrderCreated { order_id, order } => Ok(order_created(order_id, order)),
            TriggerEvent::MessageCreated {
                chat_id,
                message_id,
                message,
            } => self.message_created(chat_id, message_id, message).await,
            TriggerEvent::OrderStatusChanged {
                order_id,
                before,
                after,
            } => Ok(order_status_changed(order_id, before, after)),
            TriggerEvent::ReviewCreated { review_id, review } => {
                Ok(review_created(review_id, review))
            }
        }
    }

    async fn message_created(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
        message: &ChatMessage,
    ) -> AppResult<Result<Target, SkipReason>> {
        let Some(chat) = self.chats.get(chat_id).await? else {
            return Ok(Err(SkipReason::ChatNotFound));
        };

        let sender = message.sender_id.as_ref().filter(|id| !id.is_blank());
        let Some(recipient) = chat.counterpart_of(sender).cloned() else {
            return Ok(Err(SkipReason::NoDistinctRecipient));
        };
        // Messages without a sender have no one to name in the notification.
        let Some(sender_id) = sender.cloned() else {
            return Ok(Err(SkipReason::NoDistinctRecipient));
        };

        Ok(Ok(Target {
            recipient,
            draft: Draft::NewMessage {
                chat_id: chat_id.clone(),
                message_id: message_id.clone(),
                sender_id,
                text: message.text.clone(),
            },
        }))
    }

    async fn render(&self, draft: Draft) -> NotificationContent {
        match draft {
            Draft::NewOrder {
                order_id,
                client_id,
                status,
            } => {
                let client = self
                    .profiles
                    .display_name(client_id.as_ref(), content::DEFAULT_CLIENT_NAME)
                    .await;
                content::new_order(&order_id, client.as_str(), status.as_ref())
            }
            Draft::NewMessage {
                chat_id,
                message_id,
                sender_id,
                text,
            } => {
                let sender = self
                    .profiles
                    .display_name(Some(&sender_id), content::DEFAULT_SENDER_NAME)
                    .await;
                content::new_message(
                    &chat_id,
                    &message_id,
                    &sender_id,
                    sender.as_str(),
                    text.as_deref(),
                )
            }
            Draft::Ready(content) => content,
        }
    }
}

fn order_created(order_id: &OrderId, order: &Order) -> Result<Target, SkipReason> {
    let recipient = order.specialist().ok_or(SkipReason::MissingRecipient)?;
    Ok(Target {
        recipient: recipient.clone(),
        draft: Draft::NewOrder {
            order_id: order_id.clone(),
            client_id: order.client().cloned(),
            status: order.status.clone(),
        },
    })
}

fn order_status_changed(order_id: &OrderId, before: &Order, after: &Order) -> Result<Target, SkipReason> {
    if before.status == after.status {
        return Err(SkipReason::StatusUnchanged);
    }

    let status = after.status.as_ref().ok_or(SkipReason::StatusNotNotifiable)?;
    let content = content::order_status(order_id, status).ok_or(SkipReason::StatusNotNotifiable)?;
    let recipient = after.client().ok_or(SkipReason::MissingRecipient)?;

    Ok(Target {
        recipient: recipient.clone(),
        draft: Draft::Ready(content),
    })
}

fn review_created(review_id: &ReviewId, review: &Review) -> Result<Target, SkipReason> {
    let recipient = review.specialist().ok_or(SkipReason::MissingRecipient)?;
    Ok(Target {
        recipient: recipient.clone(),
        draft: Draft::Ready(content::new_review(
            recipient,
            review_id,
            &review.rating_label(),
        )),
    })
}
