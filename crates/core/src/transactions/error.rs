//! Transaction store error types.

use chrono::{DateTime, Utc};
use pocketbook_shared::types::TransactionId;
use pocketbook_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur while creating, editing, trashing or restoring transactions.
#[derive(Debug, Error)]
pub enum TransactionError {
    // ========== Validation Errors ==========
    /// Amount must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Category label is not one of the recognized categories.
    #[error("Unrecognized category: {0}")]
    UnknownCategory(String),

    /// Type label is neither income nor expense.
    #[error("Unrecognized transaction type: {0}")]
    UnknownType(String),

    // ========== State Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Transaction is in the trash and cannot be edited or trashed again.
    #[error("Transaction {0} is in the trash")]
    Trashed(TransactionId),

    /// Edit attempted after the window closed.
    #[error("Edit window of {window_hours}h expired for transaction {transaction_id} created at {created_at}")]
    EditWindowExpired {
        /// The transaction.
        transaction_id: TransactionId,
        /// When it was created.
        created_at: DateTime<Utc>,
        /// Window length in hours.
        window_hours: i64,
    },

    // ========== Concurrency Errors ==========
    /// The store lock could not be acquired within the configured bound.
    #[error("Timed out waiting for lock on {0}")]
    LockTimeout(String),

    // ========== Ledger Errors ==========
    /// Balance effect was refused by the ledger.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl TransactionError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Self::UnknownType(_) => "UNKNOWN_TRANSACTION_TYPE",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::Trashed(_) => "TRANSACTION_TRASHED",
            Self::EditWindowExpired { .. } => "EDIT_WINDOW_EXPIRED",
            Self::LockTimeout(_) => "CONCURRENCY_TIMEOUT",
            Self::Ledger(inner) => inner.error_code(),
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
            Self::LockTimeout(_) => true,
            Self::Ledger(inner) => inner.is_retryable(),
            _ => false,
        }
    }
}

impl From<&TransactionError> for AppError {
    fn from(err: &TransactionError) -> Self {
        let message = err.to_string();
        match err {
            TransactionError::NonPositiveAmount(_)
            | TransactionError::UnknownCategory(_)
            | TransactionError::UnknownType(_) => Self::Validation(message),
            TransactionError::TransactionNotFound(_) | TransactionError::Trashed(_) => {
                Self::NotFound(message)
            }
            TransactionError::EditWindowExpired { .. } => Self::EditWindowExpired(message),
            TransactionError::LockTimeout(_) => Self::ConcurrencyTimeout(message),
            TransactionError::Ledger(inner) => Self::from(inner),
        }
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        Self::from(&err)
    }
}
