//! Application-wide error types.
//!
//! Every domain error in the core collapses into one of these variants before
//! it reaches a caller outside the core.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input: non-positive amount, empty name, same-account transfer.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown account or transaction, or a transaction already in the trash.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Edit attempted after the mutability window closed.
    #[error("Edit window expired: {0}")]
    EditWindowExpired(String),

    /// Overdraft policy forbids the resulting negative balance.
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Lock contention exceeded the configured bound.
    #[error("Concurrency timeout: {0}")]
    ConcurrencyTimeout(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::EditWindowExpired(_) => 409,
            Self::InsufficientFunds(_) => 422,
            Self::ConcurrencyTimeout(_) => 503,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::EditWindowExpired(_) => "EDIT_WINDOW_EXPIRED",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::ConcurrencyTimeout(_) => "CONCURRENCY_TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may retry the same request unchanged.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyTimeout(_))
    }
}
