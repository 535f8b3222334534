//! Property-based tests for TransactionStore.
//!
//! - Property 1: An account balance equals the signed sum of its active transactions
//! - Property 2: Deleting then restoring leaves the balance where it was
//! - Property 3: Restore is idempotent

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::store::TransactionStore;
use super::types::{Category, CreateTransactionInput, TransactionType};
use crate::clock::SystemClock;
use crate::ledger::{AccountLedger, LedgerPolicy};
use pocketbook_shared::types::AccountId;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn transaction_type() -> impl Strategy<Value = TransactionType> {
    prop_oneof![Just(TransactionType::Income), Just(TransactionType::Expense)]
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

/// One store operation: create, or delete/restore the n-th record.
#[derive(Debug, Clone)]
enum Op {
    Create(TransactionType, Decimal, Category),
    Delete(usize),
    Restore(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (transaction_type(), positive_amount(), category())
            .prop_map(|(t, a, c)| Op::Create(t, a, c)),
        1 => (0usize..32).prop_map(Op::Delete),
        1 => (0usize..32).prop_map(Op::Restore),
    ]
}

fn fresh_store() -> (TransactionStore, AccountId) {
    let clock = Arc::new(SystemClock);
    let ledger = Arc::new(AccountLedger::new(LedgerPolicy::default(), clock.clone()));
    let account = ledger.create_account("Props").unwrap().id;
    (TransactionStore::new(ledger, clock), account)
}

fn create(
    store: &TransactionStore,
    account_id: AccountId,
    transaction_type: TransactionType,
    amount: Decimal,
    category: Category,
) -> super::types::Transaction {
    store
        .create(CreateTransactionInput {
            transaction_type,
            amount,
            category,
            description: None,
            account_id,
        })
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1.1: after any mix of create, delete and restore, the balance
    /// is the signed sum of the active records.
    #[test]
    fn prop_balance_tracks_active_transactions(ops in prop::collection::vec(op(), 1..60)) {
        let (store, account) = fresh_store();
        let mut ids = Vec::new();

        for op in ops {
            match op {
                Op::Create(t, a, c) => ids.push(create(&store, account, t, a, c).id),
                Op::Delete(i) if !ids.is_empty() => {
                    let _ = store.soft_delete(ids[i % ids.len()]);
                }
                Op::Restore(i) if !ids.is_empty() => {
                    store.restore(ids[i % ids.len()]).unwrap();
                }
                _ => {}
            }
        }

        let expected: Decimal = store
            .list_active()
            .unwrap()
            .iter()
            .map(super::types::Transaction::signed_amount)
            .sum();
        prop_assert_eq!(store.ledger().balance(account).unwrap(), expected);
        prop_assert_eq!(
            store.list_active().unwrap().len() + store.list_trashed().unwrap().len(),
            ids.len()
        );
    }

    /// Property 2.1: delete followed by restore is a balance no-op.
    #[test]
    fn prop_delete_restore_cycle_preserves_balance(
        setup in prop::collection::vec((transaction_type(), positive_amount(), category()), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let (store, account) = fresh_store();
        let ids: Vec<_> = setup
            .into_iter()
            .map(|(t, a, c)| create(&store, account, t, a, c).id)
            .collect();
        let target = ids[pick.index(ids.len())];
        let before = store.ledger().balance(account).unwrap();

        store.soft_delete(target).unwrap();
        store.restore(target).unwrap();

        prop_assert_eq!(store.ledger().balance(account).unwrap(), before);
        prop_assert!(store.get(target).unwrap().is_active());
    }

    /// Property 3.1: restoring twice equals restoring once.
    #[test]
    fn prop_restore_is_idempotent(
        t in transaction_type(),
        amount in positive_amount(),
        c in category(),
        repeats in 1usize..5,
    ) {
        let (store, account) = fresh_store();
        let id = create(&store, account, t, amount, c).id;
        store.soft_delete(id).unwrap();

        let first = store.restore(id).unwrap();
        let after_first = store.ledger().balance(account).unwrap();
        for _ in 0..repeats {
            prop_assert_eq!(store.restore(id).unwrap(), first.clone());
        }
        prop_assert_eq!(store.ledger().balance(account).unwrap(), after_first);
    }
}
