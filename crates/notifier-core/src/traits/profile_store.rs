//! Profile store accessor trait.

use async_trait::async_trait;

use crate::models::UserProfile;
use crate::result::AppResult;
use crate::types::UserId;

/// Read access to user profiles plus the single write the notifier performs.
#[async_trait]
pub trait ProfileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a profile. Returns `None` if the user does not exist.
    async fn get(&self, id: &UserId) -> AppResult<Option<UserProfile>>;

    /// Replace the profile's device token list, leaving every other field untouched.
    async fn set_device_tokens(&self, id: &UserId, tokens: &[String]) -> AppResult<()>;
}
