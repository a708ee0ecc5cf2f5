//! Profile store accessor.
//!
//! Wraps the [`ProfileStore`] collaborator with the two lookups handlers
//! need: the strict recipient lookup, whose errors propagate, and the
//! soft display-name lookup, whose errors degrade to a fallback.

use std::sync::Arc;

use tracing::warn;

use notifier_core::models::UserProfile;
use notifier_core::result::AppResult;
use notifier_core::traits::ProfileStore;
use notifier_core::types::UserId;

/// A display name, either read from a profile or substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayName {
    /// The profile's own non-blank name.
    Found(String),
    /// The fallback used because the name was missing, blank, or unreadable.
    Fallback(&'static str),
}

impl DisplayName {
    /// The name to show.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(name) => name,
            Self::Fallback(name) => name,
        }
    }

    /// Whether the fallback was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Reads profiles on behalf of the resolver and handlers.
#[derive(Debug, Clone)]
pub struct ProfileAccessor {
    store: Arc<dyn ProfileStore>,
}

impl ProfileAccessor {
    /// Creates a new accessor over `store`.
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Looks up a recipient profile. Store errors propagate.
    pub async fn recipient(&self, id: &UserId) -> AppResult<Option<UserProfile>> {
        self.store.get(id).await
    }

    /// Looks up a user's display name, never failing.
    ///
    /// Returns the fallback when `id` is absent, the profile is missing,
    /// the name is blank, or the store errors.
    pub async fn display_name(&self, id: Option<&UserId>, fallback: &'static str) -> DisplayName {
        let Some(id) = id.filter(|id| !id.is_blank()) else {
            return DisplayName::Fallback(fallback);
        };

        match self.store.get(id).await {
            Ok(Some(profile)) => match profile.display_name() {
                Some(name) => DisplayName::Found(name.to_string()),
                None => DisplayName::Fallback(fallback),
            },
            Ok(None) => DisplayName::Fallback(fallback),
            Err(e) => {
                warn!(user_id = %id, error = %e, "Display name lookup failed, using fallback");
                DisplayName::Fallback(fallback)
            }
        }
    }
}
