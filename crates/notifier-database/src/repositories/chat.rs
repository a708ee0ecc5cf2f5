//! Chat repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use notifier_core::error::{AppError, ErrorKind};
use notifier_core::models::Chat;
use notifier_core::result::AppResult;
use notifier_core::traits::ChatStore;
use notifier_core::types::{ChatId, UserId};

#[derive(Debug, FromRow)]
struct ChatRow {
    id: String,
    participants: Vec<String>,
}

/// Repository for chat lookups.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Create a new chat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatStore for ChatRepository {
    async fn get(&self, id: &ChatId) -> AppResult<Option<Chat>> {
        let row = sqlx::query_as::<_, ChatRow>("SELECT id, participants FROM chats WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find chat", e))?;

        Ok(row.map(|row| Chat {
            id: ChatId::new(row.id),
            participants: row.participants.into_iter().map(UserId::new).collect(),
        }))
    }
}
