//! Ledger error types.
//!
//! This module defines all errors that can occur while creating accounts or
//! moving money between them.

use pocketbook_shared::types::AccountId;
use pocketbook_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Account name is empty or whitespace.
    #[error("Account name cannot be empty")]
    EmptyAccountName,

    /// Amount must be strictly positive.
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Source and destination of a transfer are the same account.
    #[error("Cannot transfer from account {0} to itself")]
    SameAccountTransfer(AccountId),

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Overdraft policy forbids the resulting negative balance.
    #[error("Insufficient funds in account {account_id}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The account that would go negative.
        account_id: AccountId,
        /// Balance before the rejected operation.
        balance: Decimal,
        /// Amount the operation tried to take out.
        requested: Decimal,
    },

    /// Applying the change would push a balance past the representable range.
    #[error("Balance of account {account_id} would overflow: balance {balance}, delta {delta}")]
    BalanceOverflow {
        /// The account whose balance would overflow.
        account_id: AccountId,
        /// Balance before the rejected operation.
        balance: Decimal,
        /// Signed change the operation tried to apply.
        delta: Decimal,
    },

    /// The sum of all balances is not representable.
    #[error("Total balance across accounts overflows")]
    TotalOverflow,

    // ========== Concurrency Errors ==========
    /// A ledger lock could not be acquired within the configured bound.
    #[error("Timed out waiting for lock on {0}")]
    LockTimeout(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyAccountName => "EMPTY_ACCOUNT_NAME",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::SameAccountTransfer(_) => "SAME_ACCOUNT_TRANSFER",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::BalanceOverflow { .. } => "BALANCE_OVERFLOW",
            Self::TotalOverflow => "TOTAL_OVERFLOW",
            Self::LockTimeout(_) => "CONCURRENCY_TIMEOUT",
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
        matches!(self, Self::LockTimeout(_))
    }
}

impl From<&LedgerError> for AppError {
    fn from(err: &LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::EmptyAccountName
            | LedgerError::NonPositiveAmount(_)
            | LedgerError::SameAccountTransfer(_)
            | LedgerError::BalanceOverflow { .. } => Self::Validation(message),
            LedgerError::AccountNotFound(_) => Self::NotFound(message),
            LedgerError::InsufficientFunds { .. } => Self::InsufficientFunds(message),
            LedgerError::TotalOverflow => Self::Internal(message),
            LedgerError::LockTimeout(_) => Self::ConcurrencyTimeout(message),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::from(&err)
    }
}
