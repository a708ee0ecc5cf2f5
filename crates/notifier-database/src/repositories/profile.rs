//! User profile repository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use notifier_core::error::{AppError, ErrorKind};
use notifier_core::models::{NotificationPreferences, UserProfile};
use notifier_core::result::AppResult;
use notifier_core::traits::ProfileStore;
use notifier_core::types::UserId;

/// Tables created by the marketplace app may allow NULL in the token and
/// preference columns; both read as empty.
const SELECT_PROFILE: &str = "SELECT id, name, \
     COALESCE(device_tokens, '{}') AS device_tokens, \
     COALESCE(notification_preferences, '{}'::jsonb) AS notification_preferences \
     FROM users WHERE id = $1";

/// Row shape of the `users` columns the notifier reads.
#[derive(Debug, FromRow)]
struct ProfileRow {
    id: String,
    name: Option<String>,
    device_tokens: Vec<String>,
    notification_preferences: Json<Value>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        let notification_preferences = match row.notification_preferences.0 {
            Value::Object(map) => NotificationPreferences(map),
            _ => NotificationPreferences::default(),
        };

        Self {
            id: UserId::new(row.id),
            name: row.name,
            device_tokens: row.device_tokens,
            notification_preferences,
        }
    }
}

/// Repository for user profile lookups and device token rewrites.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn get(&self, id: &UserId) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(SELECT_PROFILE)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))?;

        Ok(row.map(UserProfile::from))
    }

    async fn set_device_tokens(&self, id: &UserId, tokens: &[String]) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET device_tokens = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(tokens.to_vec())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update device tokens", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Profile '{id}' not found")));
        }
        Ok(())
    }
}
