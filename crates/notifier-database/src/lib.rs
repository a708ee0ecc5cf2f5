//! # notifier-database
//!
//! PostgreSQL connection management, the profile and chat repositories
//! backing the notifier's collaborator traits, and the LISTEN/NOTIFY feed
//! that turns row-level triggers into [`TriggerEvent`]s.
//!
//! [`TriggerEvent`]: notifier_core::events::TriggerEvent

pub mod connection;
pub mod listener;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use listener::TriggerListener;
pub use repositories::{ChatRepository, ProfileRepository};
