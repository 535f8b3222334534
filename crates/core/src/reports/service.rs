//! Report calculations.
//!
//! Pure functions over a slice of transactions. Callers pass in a snapshot
//! of the active set; nothing here touches shared state. Every total is a
//! checked sum, so an unrepresentable aggregate is an error, not a panic.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{CategoryBreakdown, Period, RangeReport, Summary};
use crate::transactions::{Category, Transaction, TransactionType};

/// Service for computing summaries and breakdowns.
pub struct ReportService;

impl ReportService {
    /// Sums income and expense over the given transactions.
    pub fn summarize<'a, I>(transactions: I) -> Result<Summary, ReportError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let (income, expense) = transactions.into_iter().try_fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), t| match t.transaction_type {
                TransactionType::Income => income
                    .checked_add(t.amount.value())
                    .map(|income| (income, expense))
                    .ok_or(ReportError::AggregateOverflow("income")),
                TransactionType::Expense => expense
                    .checked_add(t.amount.value())
                    .map(|expense| (income, expense))
                    .ok_or(ReportError::AggregateOverflow("expense")),
            },
        )?;

        // Both sides are non-negative, so the difference always fits.
        Ok(Summary {
            income,
            expense,
            balance: income - expense,
        })
    }

    /// Summary over the transactions inside `period` and matching `category`.
    pub fn period_summary(
        transactions: &[Transaction],
        period: Period,
        category: Option<Category>,
        now: DateTime<Utc>,
        tz: Tz,
    ) -> Result<Summary, ReportError> {
        Self::summarize(
            transactions
                .iter()
                .filter(|t| period.contains(t.created_at, now, tz))
                .filter(|t| Self::matches_category(t, category)),
        )
    }

    /// Expense totals grouped by category.
    pub fn category_breakdown<'a, I>(transactions: I) -> Result<CategoryBreakdown, ReportError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut breakdown = CategoryBreakdown::new();
        for t in transactions
            .into_iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
        {
            let total = breakdown.entry(t.category).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(t.amount.value())
                .ok_or(ReportError::AggregateOverflow(t.category.as_str()))?;
        }
        Ok(breakdown)
    }

    /// Newest first, at most `limit` entries.
    ///
    /// The sort is stable, so entries sharing a timestamp keep their
    /// insertion order.
    #[must_use]
    pub fn recent(
        mut transactions: Vec<Transaction>,
        limit: usize,
        category: Option<Category>,
    ) -> Vec<Transaction> {
        transactions.retain(|t| Self::matches_category(t, category));
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        transactions.truncate(limit);
        transactions
    }

    /// Totals, expense breakdown and the matching transactions for local
    /// dates `from..=to` in `tz`.
    ///
    /// The caller validates that `from <= to`.
    pub fn range_report(
        transactions: &[Transaction],
        from: NaiveDate,
        to: NaiveDate,
        tz: Tz,
    ) -> Result<RangeReport, ReportError> {
        let in_range: Vec<Transaction> = transactions
            .iter()
            .filter(|t| {
                let day = t.created_at.with_timezone(&tz).date_naive();
                day >= from && day <= to
            })
            .cloned()
            .collect();

        Ok(RangeReport {
            from,
            to,
            summary: Self::summarize(&in_range)?,
            categories: Self::category_breakdown(&in_range)?,
            transactions: in_range,
        })
    }

    fn matches_category(t: &Transaction, category: Option<Category>) -> bool {
        category.is_none_or(|c| t.category == c)
    }
}
