//! Transaction domain types.

use chrono::{DateTime, Utc};
use pocketbook_shared::types::{AccountId, Amount, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use crate::ledger::Account;

/// Hours after creation during which a transaction stays editable.
pub const DEFAULT_EDIT_WINDOW_HOURS: u32 = 12;

/// Direction of a transaction's effect on its account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (`+amount`).
    Income,
    /// Money going out (`-amount`).
    Expense,
}

impl TransactionType {
    /// Signed balance effect of `amount` for this type.
    #[must_use]
    pub fn signed(self, amount: Amount) -> Decimal {
        match self {
            Self::Income => amount.value(),
            Self::Expense => -amount.value(),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(TransactionError::UnknownType(s.to_string())),
        }
    }
}

/// Reporting category.
///
/// Declaration order is the ordering used by category breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Wages and salary.
    Salary,
    /// Business income or spending.
    Business,
    /// Eating out and food.
    Food,
    /// Groceries.
    Groceries,
    /// Rent.
    Rent,
    /// Travel.
    Travel,
    /// Shopping.
    Shopping,
    /// Utility and other bills.
    Bills,
    /// Entertainment.
    Entertainment,
    /// Health.
    Health,
    /// Education.
    Education,
    /// Anything else.
    Other,
}

impl Category {
    /// Every recognized category.
    pub const ALL: [Self; 12] = [
        Self::Salary,
        Self::Business,
        Self::Food,
        Self::Groceries,
        Self::Rent,
        Self::Travel,
        Self::Shopping,
        Self::Bills,
        Self::Entertainment,
        Self::Health,
        Self::Education,
        Self::Other,
    ];

    /// Display label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Business => "Business",
            Self::Food => "Food",
            Self::Groceries => "Groceries",
            Self::Rent => "Rent",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = TransactionError;

    /// Case-insensitive match against the category labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TransactionError::UnknownCategory(s.to_string()))
    }
}

/// Lifecycle state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TransactionState {
    /// Counted toward its account balance and toward reports.
    Active,
    /// Soft-deleted; excluded from balances and reports until restored.
    Trashed {
        /// When it was moved to the trash.
        trashed_at: DateTime<Utc>,
    },
}

/// An income or expense line booked against one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Account the effect is booked against. Immutable.
    pub account_id: AccountId,
    /// Income or expense. Immutable.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Positive amount.
    pub amount: Amount,
    /// Reporting category.
    pub category: Category,
    /// Optional free text.
    pub description: Option<String>,
    /// When the transaction was created.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last created or edited.
    pub updated_at: DateTime<Utc>,
    /// Active or trashed.
    pub state: TransactionState,
}

impl Transaction {
    /// Signed contribution to the account balance while active.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.transaction_type.signed(self.amount)
    }

    /// Returns true while the transaction counts toward balances.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, TransactionState::Active)
    }

    /// Trash timestamp, if trashed.
    #[must_use]
    pub fn trashed_at(&self) -> Option<DateTime<Utc>> {
        match self.state {
            TransactionState::Active => None,
            TransactionState::Trashed { trashed_at } => Some(trashed_at),
        }
    }
}

/// An account and its active transactions, read as one consistent cut.
///
/// The balance always equals the account's non-transaction movements plus
/// the signed sum of `transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// The account with its balance at the time of the read.
    pub account: Account,
    /// Active transactions booked against the account, in insertion order.
    pub transactions: Vec<Transaction>,
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Amount; must be positive.
    pub amount: Decimal,
    /// Reporting category.
    pub category: Category,
    /// Optional free text.
    pub description: Option<String>,
    /// Account to book against.
    pub account_id: AccountId,
}

/// Input for editing a transaction inside its edit window.
#[derive(Debug, Clone)]
pub struct EditTransactionInput {
    /// New amount; must be positive.
    pub amount: Decimal,
    /// New category.
    pub category: Category,
    /// New description.
    pub description: Option<String>,
}
