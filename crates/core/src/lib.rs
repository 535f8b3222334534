//! Core business logic for Pocketbook.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Balances, transaction lifecycle and reporting all live here.
//!
//! # Modules
//!
//! - `clock` - Time source abstraction
//! - `ledger` - Accounts, balances and transfers
//! - `transactions` - Income/expense records with trash and restore
//! - `reports` - Period summaries and category breakdowns

pub mod clock;
pub mod ledger;
pub mod reports;
pub mod transactions;

use std::sync::Arc;

use chrono_tz::Tz;
use pocketbook_shared::{AppError, AppResult, LedgerConfig};
use tracing::info;

use clock::Clock;
use ledger::{AccountLedger, LedgerPolicy};
use reports::AggregationEngine;
use transactions::TransactionStore;

/// The three services wired together over one clock.
#[derive(Debug, Clone)]
pub struct Pocketbook {
    /// Account ledger.
    pub ledger: Arc<AccountLedger>,
    /// Transaction store booking through `ledger`.
    pub store: Arc<TransactionStore>,
    /// Read-only reporting over `store`.
    pub reports: Arc<AggregationEngine>,
}

impl Pocketbook {
    /// Builds the services from ledger configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the reporting time zone is not a
    /// known IANA name.
    pub fn from_config(config: &LedgerConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let timezone: Tz = config.reporting_timezone.parse().map_err(|e| {
            AppError::Validation(format!(
                "Unknown reporting timezone '{}': {e}",
                config.reporting_timezone
            ))
        })?;

        let policy = LedgerPolicy::from(config);
        let ledger = Arc::new(AccountLedger::new(policy, clock.clone()));
        let store = Arc::new(TransactionStore::with_edit_window(
            ledger.clone(),
            clock.clone(),
            config.edit_window_hours,
        ));
        let reports = Arc::new(AggregationEngine::new(store.clone(), clock, timezone));

        info!(
            overdraft = ?policy.overdraft,
            edit_window_hours = config.edit_window_hours,
            lock_timeout_ms = config.lock_timeout_ms,
            timezone = %timezone,
            "Pocketbook services ready"
        );
        Ok(Self {
            ledger,
            store,
            reports,
        })
    }
}
