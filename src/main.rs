//! Marketplace Notifier
//!
//! Listens for marketplace change events and delivers push notifications
//! to the affected users' devices.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::Instrument;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

use notifier_core::config::AppConfig;
use notifier_core::error::AppError;
use notifier_database::{ChatRepository, DatabasePool, ProfileRepository, TriggerListener};
use notifier_push::fcm::FcmTransport;
use notifier_service::NotificationHandlers;

/// How long shutdown waits for in-flight handlers.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTIFIER_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Notifier error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting marketplace-notifier v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        notifier_database::migration::run_migrations(db_pool.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    // ── Step 2: Collaborators ────────────────────────────────────
    let profiles = Arc::new(ProfileRepository::new(db_pool.pool().clone()));
    let chats = Arc::new(ChatRepository::new(db_pool.pool().clone()));
    let transport = Arc::new(FcmTransport::new(&config.push)?);
    tracing::info!(project = %config.push.project_id, "Push transport initialized");

    let handlers = Arc::new(NotificationHandlers::new(profiles, chats, transport));

    // ── Step 3: Change feed ──────────────────────────────────────
    let mut listener = TriggerListener::connect(&db_pool, &config.triggers.channel).await?;
    let max_in_flight = config.triggers.max_in_flight.max(1);
    let in_flight = Arc::new(Semaphore::new(max_in_flight));

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, draining in-flight handlers...");
                break Ok(());
            }
            event = listener.next_event() => {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => break Err(e),
                };

                let permit = match Arc::clone(&in_flight).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => break Err(AppError::internal(format!("Handler pool closed: {}", e))),
                };

                let handlers = Arc::clone(&handlers);
                let span = tracing::info_span!("invocation", id = %Uuid::new_v4());
                tokio::spawn(
                    async move {
                        handlers.handle(&event).await;
                        drop(permit);
                    }
                    .instrument(span),
                );
            }
        }
    };

    // ── Step 4: Graceful shutdown ────────────────────────────────
    let drain = in_flight.acquire_many(max_in_flight as u32);
    if tokio::time::timeout(DRAIN_TIMEOUT, drain).await.is_err() {
        tracing::warn!("Timed out waiting for in-flight handlers");
    }

    db_pool.close().await;
    tracing::info!(channel = listener.channel(), "Notifier shut down");
    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
