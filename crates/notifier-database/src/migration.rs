//! Schema and change-trigger migrations.

use sqlx::PgPool;
use tracing::info;

use notifier_core::error::{AppError, ErrorKind};
use notifier_core::result::AppResult;

/// Apply pending migrations: marketplace tables (created only if absent)
/// and the row-level triggers that publish change events.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying profile store migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Profile store migrations applied");
    Ok(())
}
