//! Reporting routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use pocketbook_core::reports::{
    CategoryBreakdown, DEFAULT_RECENT_LIMIT, Period, RangeReport, Summary,
};
use pocketbook_core::transactions::{Category, Transaction, TransactionError};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(summary))
        .route("/reports/recent", get(recent))
        .route("/reports/categories", get(categories))
        .route("/reports/range", get(range))
}

/// Query parameters for summaries.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// `week`, `month` or `year`; anything else means all time.
    pub period: Option<String>,
    /// Optional category label; blank means every category.
    pub category: Option<String>,
}

/// Query parameters for recent activity.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum entries to return (default: 5).
    pub limit: Option<usize>,
    /// Optional category label.
    pub category: Option<String>,
}

/// Query parameters for a date-range report.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// First day included (YYYY-MM-DD).
    pub from: NaiveDate,
    /// Last day included (YYYY-MM-DD).
    pub to: NaiveDate,
}

/// GET `/reports/summary` - Income, expense and balance for a period.
async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Summary>, ApiError> {
    let period = query.period.as_deref().map_or(Period::All, Period::parse);
    let category = parse_category(query.category.as_deref())?;
    Ok(Json(state.reports.summary(period, category)?))
}

/// GET `/reports/recent` - Newest active transactions.
async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let category = parse_category(query.category.as_deref())?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    Ok(Json(state.reports.recent(limit, category)?))
}

/// GET `/reports/categories` - Expense totals by category.
async fn categories(State(state): State<AppState>) -> Result<Json<CategoryBreakdown>, ApiError> {
    Ok(Json(state.reports.category_breakdown()?))
}

/// GET `/reports/range` - Totals, breakdown and active transactions between
/// two dates, inclusive.
async fn range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<RangeReport>, ApiError> {
    Ok(Json(state.reports.range_report(query.from, query.to)?))
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>, TransactionError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some),
    }
}
