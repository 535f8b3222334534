//! Aggregation over active transactions.
//!
//! This module provides read-only reporting:
//! - Period summaries (week, month, year, all) with optional category filter
//! - Recent activity
//! - Expense breakdown by category
//! - Inclusive date-range reports

pub mod engine;
pub mod error;
pub mod service;
pub mod types;


pub use engine::AggregationEngine;
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
