//! User profile model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::UserId;

/// A stored user record as seen by the notifier.
///
/// Profiles are owned by the marketplace application. The notifier only
/// ever rewrites `device_tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name, if the user set one.
    #[serde(default)]
    pub name: Option<String>,
    /// Registered push device tokens, in registration order.
    #[serde(default)]
    pub device_tokens: Vec<String>,
    /// Free-form notification preferences.
    #[serde(default)]
    pub notification_preferences: NotificationPreferences,
}

impl UserProfile {
    /// The display name, ignoring blank values.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Whether at least one device token is registered.
    pub fn has_device_tokens(&self) -> bool {
        !self.device_tokens.is_empty()
    }

    /// Whether push delivery is allowed for this user.
    pub fn push_enabled(&self) -> bool {
        self.notification_preferences.push_enabled()
    }
}

/// Notification preference map.
///
/// Only the `push` flag is interpreted here; all other keys are carried
/// through untouched. Push is disabled solely by an explicit boolean
/// `false`: a missing flag, or a value of any other type, leaves it enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationPreferences(pub Map<String, Value>);

impl NotificationPreferences {
    /// Whether push delivery is enabled.
    pub fn push_enabled(&self) -> bool {
        !matches!(self.0.get("push"), Some(Value::Bool(false)))
    }

    /// Build preferences with an explicit push flag.
    pub fn with_push(enabled: bool) -> Self {
        let mut map = Map::new();
        map.insert("push".to_string(), Value::Bool(enabled));
        Self(map)
    }
}
