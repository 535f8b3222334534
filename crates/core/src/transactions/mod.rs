//! Transaction store.
//!
//! Income and expense records booked against ledger accounts:
//! - Creation with immediate balance effect
//! - Time-bounded editing applied as a single net delta
//! - Soft deletion into a trash and idempotent restore
//! - Active and trashed listings, paged listings, per-account statements

pub mod error;
pub mod store;
pub mod types;

#[cfg(test)]
mod store_props;

pub use error::TransactionError;
pub use store::TransactionStore;
pub use types::{
    Category, CreateTransactionInput, DEFAULT_EDIT_WINDOW_HOURS, EditTransactionInput,
    Statement, Transaction, TransactionState, TransactionType,
};
