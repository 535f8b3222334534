//! Report data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::{Category, Transaction};

/// Default number of entries returned by a recent-activity query.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Reporting window relative to the current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Trailing seven days ending now, both ends inclusive.
    Week,
    /// Same calendar month and year as now.
    Month,
    /// Same calendar year as now.
    Year,
    /// No time filtering.
    #[default]
    All,
}

impl Period {
    /// Parses a period label. Anything unrecognized means no filtering.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "week" => Self::Week,
            "month" => Self::Month,
            "year" => Self::Year,
            _ => Self::All,
        }
    }

    /// Returns true if `at` falls inside this period as seen from `now`.
    ///
    /// Calendar periods compare local dates in `tz`.
    #[must_use]
    pub fn contains(self, at: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> bool {
        match self {
            Self::Week => at >= now - Duration::days(7) && at <= now,
            Self::Month => {
                let (at, now) = (at.with_timezone(&tz), now.with_timezone(&tz));
                at.year() == now.year() && at.month() == now.month()
            }
            Self::Year => at.with_timezone(&tz).year() == now.with_timezone(&tz).year(),
            Self::All => true,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        };
        f.write_str(label)
    }
}

/// Income, expense and their difference over a filtered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of income amounts.
    pub income: Decimal,
    /// Sum of expense amounts.
    pub expense: Decimal,
    /// `income - expense`.
    pub balance: Decimal,
}

/// Expense totals per category. Only categories with expenses appear.
pub type CategoryBreakdown = BTreeMap<Category, Decimal>;

/// Totals, expense breakdown and matching transactions over an inclusive
/// calendar-date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeReport {
    /// First day included.
    pub from: NaiveDate,
    /// Last day included.
    pub to: NaiveDate,
    /// Totals over the range.
    #[serde(flatten)]
    pub summary: Summary,
    /// Expense breakdown over the range.
    pub categories: CategoryBreakdown,
    /// Active transactions inside the range, in insertion order.
    pub transactions: Vec<Transaction>,
}
