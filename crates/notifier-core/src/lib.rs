//! # notifier-core
//!
//! Core crate for the marketplace notifier. Contains the domain models the
//! notification handlers read, the trigger events they react to, the traits
//! for the external collaborators (profile store, chat store, push
//! transport), configuration schemas, typed identifiers, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other notifier crates.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
