//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the ledger, transaction store and reports
//! - JSON error responses
//!
//! Authentication is out of scope; callers are assumed to be authorized.

pub mod error;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use axum::Router;
use pocketbook_core::Pocketbook;
use pocketbook_core::ledger::AccountLedger;
use pocketbook_core::reports::AggregationEngine;
use pocketbook_core::transactions::TransactionStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account ledger.
    pub ledger: Arc<AccountLedger>,
    /// Transaction store.
    pub store: Arc<TransactionStore>,
    /// Aggregation engine.
    pub reports: Arc<AggregationEngine>,
}

impl From<Pocketbook> for AppState {
    fn from(app: Pocketbook) -> Self {
        Self {
            ledger: app.ledger,
            store: app.store,
            reports: app.reports,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
