//! Convenience result type alias for Postbox.

use crate::error::AppError;

/// A specialized `Result` type for Postbox operations.
pub type AppResult<T> = Result<T, AppError>;
