//! Property-based tests for AccountLedger.
//!
//! - Property 1: Transfer conservation
//! - Property 2: Overdraft policy never lets a balance drop below zero
//! - Property 3: Failed transfers leave balances untouched

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::service::AccountLedger;
use super::types::{LedgerPolicy, OverdraftPolicy};
use crate::clock::SystemClock;
use pocketbook_shared::types::AccountId;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate opening balances (0.00 to 5,000.00).
fn opening_balance() -> impl Strategy<Value = Decimal> {
    (0i64..500_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a list of (from index, to index, amount) moves.
fn transfers(accounts: usize) -> impl Strategy<Value = Vec<(usize, usize, Decimal)>> {
    prop::collection::vec((0..accounts, 0..accounts, positive_amount()), 1..40)
}

fn seeded_ledger(
    overdraft: OverdraftPolicy,
    openings: &[Decimal],
) -> (AccountLedger, Vec<AccountId>) {
    let ledger = AccountLedger::new(
        LedgerPolicy {
            overdraft,
            lock_timeout: Duration::from_millis(50),
        },
        Arc::new(SystemClock),
    );
    let ids = openings
        .iter()
        .enumerate()
        .map(|(i, opening)| {
            let account = ledger.create_account(&format!("Account {i}")).unwrap();
            if *opening > Decimal::ZERO {
                ledger.adjust_balance(account.id, *opening).unwrap();
            }
            account.id
        })
        .collect();
    (ledger, ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1.1: every committed transfer preserves the pair sum,
    /// and the ledger-wide total never moves.
    #[test]
    fn prop_transfer_conserves_money(
        openings in prop::collection::vec(opening_balance(), 4),
        moves in transfers(4),
    ) {
        let (ledger, ids) = seeded_ledger(OverdraftPolicy::Allow, &openings);
        let total_before = ledger.total_balance().unwrap();

        for (from, to, amount) in moves {
            let before = ledger.balance(ids[from]).unwrap() + ledger.balance(ids[to]).unwrap();
            match ledger.transfer(ids[from], ids[to], amount) {
                Ok(receipt) => {
                    prop_assert_eq!(receipt.from_balance + receipt.to_balance, before);
                }
                Err(LedgerError::SameAccountTransfer(_)) => prop_assert_eq!(from, to),
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
            prop_assert_eq!(ledger.total_balance().unwrap(), total_before);
        }
    }

    /// Property 2.1: with overdraft rejected, no sequence of transfers
    /// produces a negative balance.
    #[test]
    fn prop_reject_policy_keeps_balances_non_negative(
        openings in prop::collection::vec(opening_balance(), 3),
        moves in transfers(3),
    ) {
        let (ledger, ids) = seeded_ledger(OverdraftPolicy::Reject, &openings);
        let total_before = ledger.total_balance().unwrap();

        for (from, to, amount) in moves {
            let _ = ledger.transfer(ids[from], ids[to], amount);
            for account in ledger.list_accounts().unwrap() {
                prop_assert!(account.balance >= Decimal::ZERO);
            }
        }
        prop_assert_eq!(ledger.total_balance().unwrap(), total_before);
    }

    /// Property 3.1: a rejected transfer changes neither side.
    #[test]
    fn prop_rejected_transfer_is_atomic(
        opening in opening_balance(),
        excess in positive_amount(),
    ) {
        let (ledger, ids) = seeded_ledger(OverdraftPolicy::Reject, &[opening, Decimal::ZERO]);

        let result = ledger.transfer(ids[0], ids[1], opening + excess);

        let rejected = matches!(result, Err(LedgerError::InsufficientFunds { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(ledger.balance(ids[0]).unwrap(), opening);
        prop_assert_eq!(ledger.balance(ids[1]).unwrap(), Decimal::ZERO);
    }
}
