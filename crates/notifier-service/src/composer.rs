//! Notification composer.

use notifier_core::error::AppError;
use notifier_core::models::PushMessage;
use notifier_core::result::AppResult;

use crate::content::NotificationContent;

/// Addresses notification content to a set of device tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationComposer;

impl NotificationComposer {
    /// Builds the payload for `tokens`.
    ///
    /// Title and body must be non-blank, the data map must carry a `type`
    /// discriminator, and at least one token is required.
    pub fn compose(content: NotificationContent, tokens: &[String]) -> AppResult<PushMessage> {
        if content.title.trim().is_empty() {
            return Err(AppError::validation("Notification title is empty"));
        }
        if content.body.trim().is_empty() {
            return Err(AppError::validation("Notification body is empty"));
        }
        if !content.data.contains_key("type") {
            return Err(AppError::validation("Notification data has no type"));
        }
        if tokens.is_empty() {
            return Err(AppError::validation("Notification has no target tokens"));
        }

        Ok(PushMessage {
            title: content.title,
            body: content.body,
            data: content.data,
            tokens: tokens.to_vec(),
        })
    }
}
