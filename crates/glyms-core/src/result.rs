//! Convenience result type alias for Glyms.

use crate::error::AppError;

/// A specialized `Result` type for Glyms operations.
pub type AppResult<T> = Result<T, AppError>;
