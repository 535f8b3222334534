//! Aggregation engine.
//!
//! Read-only view over the transaction store. Every query takes one snapshot
//! of the active set, so a single report never mixes two store states.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{debug, warn};

use super::error::ReportError;
use super::service::ReportService;
use super::types::{CategoryBreakdown, Period, RangeReport, Summary};
use crate::clock::Clock;
use crate::transactions::{Category, Transaction, TransactionStore};

/// Computes summaries and breakdowns over active transactions.
pub struct AggregationEngine {
    store: Arc<TransactionStore>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
}

impl std::fmt::Debug for AggregationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregationEngine")
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl AggregationEngine {
    /// Creates an engine reporting calendar periods in `timezone`.
    #[must_use]
    pub fn new(store: Arc<TransactionStore>, clock: Arc<dyn Clock>, timezone: Tz) -> Self {
        Self {
            store,
            clock,
            timezone,
        }
    }

    /// Time zone used for calendar periods and date ranges.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Income, expense and balance for `period`, optionally one category only.
    pub fn summary(
        &self,
        period: Period,
        category: Option<Category>,
    ) -> Result<Summary, ReportError> {
        let snapshot = self.store.list_active()?;
        let now = self.clock.now();
        let summary =
            ReportService::period_summary(&snapshot, period, category, now, self.timezone)?;
        debug!(%period, ?category, income = %summary.income, expense = %summary.expense, "Summary computed");
        Ok(summary)
    }

    /// Summary over every active transaction.
    pub fn total_summary(&self) -> Result<Summary, ReportError> {
        self.summary(Period::All, None)
    }

    /// The `limit` newest active transactions, optionally one category only.
    pub fn recent(
        &self,
        limit: usize,
        category: Option<Category>,
    ) -> Result<Vec<Transaction>, ReportError> {
        Ok(ReportService::recent(
            self.store.list_active()?,
            limit,
            category,
        ))
    }

    /// Active expense totals per category.
    pub fn category_breakdown(&self) -> Result<CategoryBreakdown, ReportError> {
        let snapshot = self.store.list_active()?;
        ReportService::category_breakdown(&snapshot)
    }

    /// Totals, expense breakdown and active transactions for the inclusive
    /// local date range.
    pub fn range_report(&self, from: NaiveDate, to: NaiveDate) -> Result<RangeReport, ReportError> {
        if from > to {
            warn!(%from, %to, "Range report rejected: start after end");
            return Err(ReportError::InvalidDateRange {
                start: from,
                end: to,
            });
        }
        let snapshot = self.store.list_active()?;
        ReportService::range_report(&snapshot, from, to, self.timezone)
    }
}
