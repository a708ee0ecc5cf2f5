//! Convenience result type alias for the notifier.

use crate::error::AppError;

/// A specialized `Result` type for notifier operations.
pub type AppResult<T> = Result<T, AppError>;
