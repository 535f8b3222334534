//! Account ledger: the only component allowed to change a balance.
//!
//! Each account balance sits behind its own lock. Every multi-account
//! operation acquires those locks in ascending `AccountId` order, so two
//! transfers over the same pair in opposite directions can never deadlock.
//! All waits are bounded by `LedgerPolicy::lock_timeout`.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard, RwLock};
use pocketbook_shared::types::{AccountId, Amount};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::error::LedgerError;
use super::types::{Account, LedgerPolicy, OverdraftPolicy, TransferReceipt};
use crate::clock::Clock;

/// One account and its lock-guarded balance.
#[derive(Debug)]
struct AccountCell {
    id: AccountId,
    name: String,
    created_at: DateTime<Utc>,
    balance: Mutex<Decimal>,
}

impl AccountCell {
    fn snapshot(&self, balance: Decimal) -> Account {
        Account {
            id: self.id,
            name: self.name.clone(),
            balance,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Default)]
struct Registry {
    /// Insertion order.
    order: Vec<Arc<AccountCell>>,
    by_id: HashMap<AccountId, Arc<AccountCell>>,
}

/// Owns accounts and their balances.
pub struct AccountLedger {
    registry: RwLock<Registry>,
    policy: LedgerPolicy,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AccountLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountLedger")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl AccountLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(policy: LedgerPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            policy,
            clock,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    /// Creates an account with a zero balance.
    pub fn create_account(&self, name: &str) -> Result<Account, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected account with empty name");
            return Err(LedgerError::EmptyAccountName);
        }

        let cell = Arc::new(AccountCell {
            id: AccountId::new(),
            name: name.to_string(),
            created_at: self.clock.now(),
            balance: Mutex::new(Decimal::ZERO),
        });

        let mut registry = self
            .registry
            .try_write_for(self.policy.lock_timeout)
            .ok_or_else(|| LedgerError::LockTimeout("account registry".to_string()))?;
        registry.by_id.insert(cell.id, Arc::clone(&cell));
        registry.order.push(Arc::clone(&cell));
        drop(registry);

        info!(account_id = %cell.id, name = %cell.name, "Account created");
        Ok(cell.snapshot(Decimal::ZERO))
    }

    /// Lists all accounts in creation order.
    ///
    /// Balances are read with every account lock held at once, so the result
    /// is a consistent cut: no transfer is half-visible.
    pub fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let cells = self.cells()?;

        let mut lock_order: Vec<usize> = (0..cells.len()).collect();
        lock_order.sort_by_key(|&i| cells[i].id);

        let mut balances = vec![Decimal::ZERO; cells.len()];
        let mut guards = Vec::with_capacity(cells.len());
        for &i in &lock_order {
            let guard = self.lock_balance(&cells[i])?;
            balances[i] = *guard;
            guards.push(guard);
        }
        drop(guards);

        Ok(cells
            .iter()
            .zip(balances)
            .map(|(cell, balance)| cell.snapshot(balance))
            .collect())
    }

    /// Returns a single account.
    pub fn get_account(&self, id: AccountId) -> Result<Account, LedgerError> {
        let cell = self.cell(id)?;
        let balance = *self.lock_balance(&cell)?;
        Ok(cell.snapshot(balance))
    }

    /// Returns the current balance of an account.
    pub fn balance(&self, id: AccountId) -> Result<Decimal, LedgerError> {
        let cell = self.cell(id)?;
        let balance = *self.lock_balance(&cell)?;
        Ok(balance)
    }

    /// Sum of all balances, read as one consistent cut.
    pub fn total_balance(&self) -> Result<Decimal, LedgerError> {
        self.list_accounts()?
            .iter()
            .try_fold(Decimal::ZERO, |total, a| total.checked_add(a.balance))
            .ok_or(LedgerError::TotalOverflow)
    }

    /// Applies a signed delta to one balance and returns the new balance.
    ///
    /// This is the primitive the transaction store books through. A negative
    /// delta that would leave the balance below zero fails with
    /// `InsufficientFunds` when the policy is `Reject`.
    pub fn adjust_balance(&self, id: AccountId, delta: Decimal) -> Result<Decimal, LedgerError> {
        let cell = self.cell(id)?;
        let mut balance = self.lock_balance(&cell)?;
        let updated = self.checked_apply(id, *balance, delta)?;
        *balance = updated;
        drop(balance);

        debug!(account_id = %id, delta = %delta, balance = %updated, "Balance adjusted");
        Ok(updated)
    }

    /// Moves `amount` from one account to another atomically.
    ///
    /// Both balances change or neither does. Both new balances are computed
    /// before either is written.
    pub fn transfer(
        &self,
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        if from_id == to_id {
            warn!(account_id = %from_id, "Rejected transfer to same account");
            return Err(LedgerError::SameAccountTransfer(from_id));
        }
        let amount = Amount::new(amount).map_err(|e| LedgerError::NonPositiveAmount(e.0))?;

        let from = self.cell(from_id)?;
        let to = self.cell(to_id)?;

        let from_first = from_id < to_id;
        let (first, second) = if from_first { (&from, &to) } else { (&to, &from) };
        let mut first_guard = self.lock_balance(first)?;
        let mut second_guard = self.lock_balance(second)?;
        let (from_balance, to_balance) = if from_first {
            (&mut *first_guard, &mut *second_guard)
        } else {
            (&mut *second_guard, &mut *first_guard)
        };

        let new_from = self.checked_apply(from_id, *from_balance, -amount.value())?;
        let new_to = self.checked_apply(to_id, *to_balance, amount.value())?;
        *from_balance = new_from;
        *to_balance = new_to;
        drop(first_guard);
        drop(second_guard);

        info!(
            from_id = %from_id,
            to_id = %to_id,
            amount = %amount,
            from_balance = %new_from,
            to_balance = %new_to,
            "Transfer committed"
        );

        Ok(TransferReceipt {
            from_id,
            to_id,
            amount,
            from_balance: new_from,
            to_balance: new_to,
        })
    }

    fn checked_apply(
        &self,
        id: AccountId,
        current: Decimal,
        delta: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let Some(updated) = current.checked_add(delta) else {
            warn!(account_id = %id, balance = %current, delta = %delta, "Balance overflow rejected");
            return Err(LedgerError::BalanceOverflow {
                account_id: id,
                balance: current,
                delta,
            });
        };
        if self.policy.overdraft == OverdraftPolicy::Reject
            && delta < Decimal::ZERO
            && updated < Decimal::ZERO
        {
            warn!(account_id = %id, balance = %current, delta = %delta, "Overdraft rejected");
            return Err(LedgerError::InsufficientFunds {
                account_id: id,
                balance: current,
                requested: -delta,
            });
        }
        Ok(updated)
    }

    fn read_registry(
        &self,
    ) -> Result<parking_lot::RwLockReadGuard<'_, Registry>, LedgerError> {
        self.registry
            .try_read_for(self.policy.lock_timeout)
            .ok_or_else(|| LedgerError::LockTimeout("account registry".to_string()))
    }

    fn cell(&self, id: AccountId) -> Result<Arc<AccountCell>, LedgerError> {
        self.read_registry()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id))
    }

    fn cells(&self) -> Result<Vec<Arc<AccountCell>>, LedgerError> {
        Ok(self.read_registry()?.order.clone())
    }

    fn lock_balance<'a>(
        &self,
        cell: &'a AccountCell,
    ) -> Result<MutexGuard<'a, Decimal>, LedgerError> {
        cell.balance
            .try_lock_for(self.policy.lock_timeout)
            .ok_or_else(|| {
                warn!(account_id = %cell.id, "Account lock wait exceeded");
                LedgerError::LockTimeout(format!("account {}", cell.id))
            })
    }
}
