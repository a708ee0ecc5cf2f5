//! Chat lookup trait.

use async_trait::async_trait;

use crate::models::Chat;
use crate::result::AppResult;
use crate::types::ChatId;

/// Read access to chat documents.
#[async_trait]
pub trait ChatStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a chat. Returns `None` if the chat does not exist.
    async fn get(&self, id: &ChatId) -> AppResult<Option<Chat>>;
}
