//! Ledger domain types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use pocketbook_shared::types::{AccountId, Amount};
use pocketbook_shared::LedgerConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of an account.
///
/// The balance is owned by the ledger; this value is a copy taken under the
/// account lock and is never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Current balance.
    pub balance: Decimal,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Result of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Source account.
    pub from_id: AccountId,
    /// Destination account.
    pub to_id: AccountId,
    /// Amount moved.
    pub amount: Amount,
    /// Source balance after the transfer.
    pub from_balance: Decimal,
    /// Destination balance after the transfer.
    pub to_balance: Decimal,
}

/// Whether a balance may become negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdraftPolicy {
    /// Negative balances are recorded as-is.
    #[default]
    Allow,
    /// Any withdrawal that would leave the balance below zero is refused.
    Reject,
}

/// Policy knobs for the account ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// Overdraft handling.
    pub overdraft: OverdraftPolicy,
    /// Maximum wait for any single lock.
    pub lock_timeout: Duration,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

impl From<&LedgerConfig> for LedgerPolicy {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            overdraft: if config.allow_overdraft {
                OverdraftPolicy::Allow
            } else {
                OverdraftPolicy::Reject
            },
            lock_timeout: Duration::from_millis(config.lock_timeout_ms),
        }
    }
}
