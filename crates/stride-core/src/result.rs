//! Convenience result type alias for Stride.

use crate::error::AppError;

/// A specialized `Result` type for Stride operations.
pub type AppResult<T> = Result<T, AppError>;
