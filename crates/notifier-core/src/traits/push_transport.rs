//! Push delivery transport trait.

use async_trait::async_trait;

use crate::models::{DeliveryReport, PushMessage};
use crate::result::AppResult;

/// Delivers one payload to many device tokens in a single call.
#[async_trait]
pub trait PushTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Send `message` to every token in `message.tokens`.
    ///
    /// On success the report holds exactly one outcome per token, in the
    /// same order. An `Err` means the batch as a whole could not be sent.
    async fn send_batch(&self, message: &PushMessage) -> AppResult<DeliveryReport>;

    /// Transport name for logging.
    fn name(&self) -> &str;
}
