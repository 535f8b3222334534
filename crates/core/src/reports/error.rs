//! Report error types.

use chrono::NaiveDate;
use pocketbook_shared::AppError;
use thiserror::Error;

use crate::transactions::TransactionError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A total over the snapshot is not representable.
    #[error("Aggregate overflow while computing {0}")]
    AggregateOverflow(&'static str),

    /// The transaction snapshot could not be read.
    #[error(transparent)]
    Store(#[from] TransactionError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::AggregateOverflow(_) => "AGGREGATE_OVERFLOW",
            Self::Store(inner) => inner.error_code(),
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        AppError::from(self).status_code()
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InvalidDateRange { .. } | Self::AggregateOverflow(_) => false,
            Self::Store(inner) => inner.is_retryable(),
        }
    }
}

impl From<&ReportError> for AppError {
    fn from(err: &ReportError) -> Self {
        match err {
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
            ReportError::AggregateOverflow(_) => Self::Internal(err.to_string()),
            ReportError::Store(inner) => Self::from(inner),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        Self::from(&err)
    }
}
