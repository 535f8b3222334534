//! Transaction store.
//!
//! Owns income/expense records and books their balance effect through the
//! account ledger. Records are never removed: deletion moves a record to the
//! trash and reverses its effect, restore re-applies it.
//!
//! Writers take the store lock, then the account lock inside the ledger.
//! The ledger never calls back into the store, so that order is acyclic.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use pocketbook_shared::types::{AccountId, Amount, PageRequest, PageResponse, TransactionId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::TransactionError;
use super::types::{
    CreateTransactionInput, EditTransactionInput, Statement, Transaction, TransactionState,
    DEFAULT_EDIT_WINDOW_HOURS,
};
use crate::clock::Clock;
use crate::ledger::AccountLedger;

#[derive(Debug, Default)]
struct StoreState {
    /// Insertion order.
    order: Vec<TransactionId>,
    records: HashMap<TransactionId, Transaction>,
}

impl StoreState {
    fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

/// Stores transactions and keeps account balances in step with them.
pub struct TransactionStore {
    ledger: Arc<AccountLedger>,
    clock: Arc<dyn Clock>,
    edit_window: Duration,
    state: RwLock<StoreState>,
}

impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("edit_window", &self.edit_window)
            .finish_non_exhaustive()
    }
}

impl TransactionStore {
    /// Creates a store with the default 12-hour edit window.
    #[must_use]
    pub fn new(ledger: Arc<AccountLedger>, clock: Arc<dyn Clock>) -> Self {
        Self::with_edit_window(ledger, clock, DEFAULT_EDIT_WINDOW_HOURS)
    }

    /// Creates a store with a custom edit window.
    #[must_use]
    pub fn with_edit_window(
        ledger: Arc<AccountLedger>,
        clock: Arc<dyn Clock>,
        edit_window_hours: u32,
    ) -> Self {
        Self {
            ledger,
            clock,
            edit_window: Duration::hours(i64::from(edit_window_hours)),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// The ledger this store books through.
    #[must_use]
    pub fn ledger(&self) -> &Arc<AccountLedger> {
        &self.ledger
    }

    /// Records a new active transaction and applies its balance effect.
    pub fn create(&self, input: CreateTransactionInput) -> Result<Transaction, TransactionError> {
        let amount = positive(input.amount)?;

        let mut state = self.write_state()?;
        let now = self.clock.now();
        let transaction = Transaction {
            id: TransactionId::new(),
            account_id: input.account_id,
            transaction_type: input.transaction_type,
            amount,
            category: input.category,
            description: normalize_description(input.description),
            created_at: now,
            updated_at: now,
            state: TransactionState::Active,
        };

        let balance = self
            .ledger
            .adjust_balance(transaction.account_id, transaction.signed_amount())?;
        state.order.push(transaction.id);
        state.records.insert(transaction.id, transaction.clone());
        drop(state);

        info!(
            transaction_id = %transaction.id,
            account_id = %transaction.account_id,
            kind = %transaction.transaction_type,
            amount = %transaction.amount,
            category = %transaction.category,
            balance = %balance,
            "Transaction created"
        );
        Ok(transaction)
    }

    /// Changes amount, category and description of an active transaction
    /// still inside its edit window.
    ///
    /// The balance moves by the net difference in one ledger call, so no
    /// reader ever sees the old effect reversed without the new one applied.
    pub fn edit(
        &self,
        id: TransactionId,
        input: EditTransactionInput,
    ) -> Result<Transaction, TransactionError> {
        let amount = positive(input.amount)?;

        let mut state = self.write_state()?;
        let now = self.clock.now();
        let record = state
            .records
            .get_mut(&id)
            .ok_or(TransactionError::TransactionNotFound(id))?;

        if !record.is_active() {
            warn!(transaction_id = %id, "Edit rejected: transaction is trashed");
            return Err(TransactionError::Trashed(id));
        }
        if now - record.created_at > self.edit_window {
            warn!(transaction_id = %id, created_at = %record.created_at, "Edit window expired");
            return Err(TransactionError::EditWindowExpired {
                transaction_id: id,
                created_at: record.created_at,
                window_hours: self.edit_window.num_hours(),
            });
        }

        let delta = record.transaction_type.signed(amount) - record.signed_amount();
        if !delta.is_zero() {
            self.ledger.adjust_balance(record.account_id, delta)?;
        }

        record.amount = amount;
        record.category = input.category;
        record.description = normalize_description(input.description);
        record.updated_at = now;
        let updated = record.clone();
        drop(state);

        info!(transaction_id = %id, delta = %delta, "Transaction edited");
        Ok(updated)
    }

    /// Moves an active transaction to the trash and reverses its balance effect.
    pub fn soft_delete(&self, id: TransactionId) -> Result<Transaction, TransactionError> {
        let mut state = self.write_state()?;
        let now = self.clock.now();
        let record = state
            .records
            .get_mut(&id)
            .ok_or(TransactionError::TransactionNotFound(id))?;

        if !record.is_active() {
            warn!(transaction_id = %id, "Delete rejected: already trashed");
            return Err(TransactionError::Trashed(id));
        }

        self.ledger
            .adjust_balance(record.account_id, -record.signed_amount())?;
        record.state = TransactionState::Trashed { trashed_at: now };
        let trashed = record.clone();
        drop(state);

        info!(transaction_id = %id, account_id = %trashed.account_id, "Transaction trashed");
        Ok(trashed)
    }

    /// Brings a trashed transaction back and re-applies its stored effect.
    ///
    /// Restoring an active transaction is a no-op that returns it unchanged.
    pub fn restore(&self, id: TransactionId) -> Result<Transaction, TransactionError> {
        let mut state = self.write_state()?;
        let record = state
            .records
            .get_mut(&id)
            .ok_or(TransactionError::TransactionNotFound(id))?;

        if record.is_active() {
            debug!(transaction_id = %id, "Restore skipped: already active");
            return Ok(record.clone());
        }

        self.ledger
            .adjust_balance(record.account_id, record.signed_amount())?;
        record.state = TransactionState::Active;
        let restored = record.clone();
        drop(state);

        info!(transaction_id = %id, account_id = %restored.account_id, "Transaction restored");
        Ok(restored)
    }

    /// Returns one transaction, active or trashed.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, TransactionError> {
        self.read_state()?
            .records
            .get(&id)
            .cloned()
            .ok_or(TransactionError::TransactionNotFound(id))
    }

    /// Active transactions in insertion order, read under one lock.
    pub fn list_active(&self) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self
            .read_state()?
            .iter()
            .filter(|t| t.is_active())
            .cloned()
            .collect())
    }

    /// Trashed transactions in insertion order.
    pub fn list_trashed(&self) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self
            .read_state()?
            .iter()
            .filter(|t| !t.is_active())
            .cloned()
            .collect())
    }

    /// An account's balance and its active transactions.
    ///
    /// The balance is read while the store lock is held. Every store write
    /// adjusts balances under the write lock, so the two always agree.
    pub fn statement(&self, account_id: AccountId) -> Result<Statement, TransactionError> {
        let state = self.read_state()?;
        let account = self.ledger.get_account(account_id)?;
        let transactions = state
            .iter()
            .filter(|t| t.account_id == account_id && t.is_active())
            .cloned()
            .collect();
        drop(state);

        debug!(account_id = %account_id, "Statement read");
        Ok(Statement {
            account,
            transactions,
        })
    }

    /// One page of active transactions in insertion order.
    pub fn list_active_page(
        &self,
        request: &PageRequest,
    ) -> Result<PageResponse<Transaction>, TransactionError> {
        Ok(PageResponse::from_items(self.list_active()?, request))
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, StoreState>, TransactionError> {
        self.state
            .try_read_for(self.ledger.policy().lock_timeout)
            .ok_or_else(|| TransactionError::LockTimeout("transaction store".to_string()))
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, StoreState>, TransactionError> {
        self.state
            .try_write_for(self.ledger.policy().lock_timeout)
            .ok_or_else(|| {
                warn!("Transaction store lock wait exceeded");
                TransactionError::LockTimeout("transaction store".to_string())
            })
    }
}

fn positive(amount: Decimal) -> Result<Amount, TransactionError> {
    Amount::new(amount).map_err(|e| TransactionError::NonPositiveAmount(e.0))
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
