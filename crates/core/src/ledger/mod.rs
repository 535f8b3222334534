//! Account ledger.
//!
//! This module owns accounts and their balances:
//! - Account creation and consistent account listings
//! - The signed balance adjustment primitive used by the transaction store
//! - Atomic two-account transfers with deterministic lock ordering
//! - Overdraft policy
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::LedgerError;
pub use service::AccountLedger;
pub use types::{Account, LedgerPolicy, OverdraftPolicy, TransferReceipt};
