//! Transaction routes: create, edit, trash and restore.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use pocketbook_core::transactions::{
    Category, CreateTransactionInput, EditTransactionInput, Transaction, TransactionType,
};
use pocketbook_shared::types::{AccountId, PageRequest, PageResponse, TransactionId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_active).post(create_transaction))
        .route("/transactions/page", get(list_active_page))
        .route("/transactions/trash", get(list_trashed))
        .route(
            "/transactions/{transaction_id}",
            get(get_transaction)
                .put(edit_transaction)
                .delete(delete_transaction),
        )
        .route(
            "/transactions/{transaction_id}/restore",
            post(restore_transaction),
        )
}

/// Request body for creating a transaction.
///
/// Type and category arrive as labels so unknown values surface as
/// validation errors rather than body rejections.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Account to book against.
    pub account_id: AccountId,
}

/// Request body for editing a transaction.
#[derive(Debug, Deserialize)]
pub struct EditTransactionRequest {
    /// New positive amount.
    pub amount: Decimal,
    /// New category label.
    pub category: String,
    /// New description.
    pub description: Option<String>,
}

/// POST `/transactions` - Record income or expense.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateTransactionInput {
        transaction_type: payload.transaction_type.parse::<TransactionType>()?,
        amount: payload.amount,
        category: payload.category.parse::<Category>()?,
        description: payload.description,
        account_id: payload.account_id,
    };
    let transaction = state.store.create(input)?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// GET `/transactions` - Active transactions in insertion order.
async fn list_active(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.store.list_active()?;
    Ok(Json(json!({ "transactions": transactions })))
}

/// GET `/transactions/page` - One page of active transactions.
async fn list_active_page(
    State(state): State<AppState>,
    Query(query): Query<PageRequest>,
) -> Result<Json<PageResponse<Transaction>>, ApiError> {
    let request = PageRequest::new(query.page, query.per_page);
    Ok(Json(state.store.list_active_page(&request)?))
}

/// GET `/transactions/trash` - Trashed transactions.
async fn list_trashed(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let transactions = state.store.list_trashed()?;
    Ok(Json(json!({ "transactions": transactions })))
}

/// GET `/transactions/{transaction_id}` - One transaction, active or trashed.
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(state.store.get(transaction_id)?))
}

/// PUT `/transactions/{transaction_id}` - Edit inside the edit window.
async fn edit_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    Json(payload): Json<EditTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    let input = EditTransactionInput {
        amount: payload.amount,
        category: payload.category.parse::<Category>()?,
        description: payload.description,
    };
    Ok(Json(state.store.edit(transaction_id, input)?))
}

/// DELETE `/transactions/{transaction_id}` - Move to trash.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<StatusCode, ApiError> {
    state.store.soft_delete(transaction_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/transactions/{transaction_id}/restore` - Bring back from trash.
async fn restore_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(state.store.restore(transaction_id)?))
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use chrono::Duration;
    use serde_json::json;

    async fn balance(app: &TestApp, account: &str) -> String {
        let (_, body) = app
            .send(Method::GET, &format!("/api/v1/accounts/{account}"), None)
            .await;
        body["balance"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_transaction_updates_balance() {
        let app = TestApp::new();
        let account = app.account("Main").await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/transactions",
                Some(json!({
                    "type": "expense",
                    "amount": "42.50",
                    "category": "food",
                    "description": "Lunch",
                    "account_id": account,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["type"], "expense");
        assert_eq!(body["category"], "Food");
        assert_eq!(body["amount"], "42.50");
        assert_eq!(body["state"]["status"], "active");
        assert_eq!(balance(&app, &account).await, "-42.50");
    }

    #[tokio::test]
    async fn test_create_transaction_validation() {
        let app = TestApp::new();
        let account = app.account("Main").await;

        let cases = [
            (json!({ "type": "expense", "amount": "10", "category": "Pets", "account_id": account }), "UNKNOWN_CATEGORY"),
            (json!({ "type": "refund", "amount": "10", "category": "Food", "account_id": account }), "UNKNOWN_TRANSACTION_TYPE"),
            (json!({ "type": "income", "amount": "0", "category": "Salary", "account_id": account }), "NON_POSITIVE_AMOUNT"),
        ];
        for (payload, code) in cases {
            let (status, body) = app.send(Method::POST, "/api/v1/transactions", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], code);
        }

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/transactions",
                Some(json!({
                    "type": "income",
                    "amount": "10",
                    "category": "Salary",
                    "account_id": "0190b5a4-0000-7000-8000-000000000000",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "ACCOUNT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_overflowing_balance_is_rejected() {
        let app = TestApp::new();
        let account = app.account("Main").await;
        app.book(&account, "income", "50000000000000000000000000000", "Salary").await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/transactions",
                Some(json!({
                    "type": "income",
                    "amount": "50000000000000000000000000000",
                    "category": "Salary",
                    "account_id": account,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BALANCE_OVERFLOW");
        assert_eq!(balance(&app, &account).await, "50000000000000000000000000000");

        let (status, body) = app.send(Method::GET, "/api/v1/transactions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_within_and_after_window() {
        let app = TestApp::new();
        let account = app.account("Main").await;
        let id = app.book(&account, "expense", "100", "Rent").await;
        let uri = format!("/api/v1/transactions/{id}");

        app.clock.advance(Duration::hours(1));
        let (status, body) = app
            .send(
                Method::PUT,
                &uri,
                Some(json!({ "amount": "80", "category": "Bills", "description": "fixed" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "Bills");
        assert_eq!(body["description"], "fixed");
        assert_eq!(balance(&app, &account).await, "-80");

        app.clock.advance(Duration::hours(12));
        let (status, body) = app
            .send(Method::PUT, &uri, Some(json!({ "amount": "1", "category": "Bills" })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "EDIT_WINDOW_EXPIRED");
        assert_eq!(balance(&app, &account).await, "-80");
    }

    #[tokio::test]
    async fn test_delete_restore_round_trip() {
        let app = TestApp::new();
        let account = app.account("Main").await;
        app.book(&account, "income", "1000", "Salary").await;
        let id = app.book(&account, "expense", "150", "Food").await;
        let uri = format!("/api/v1/transactions/{id}");

        let (status, _) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(balance(&app, &account).await, "1000");

        let (status, body) = app.send(Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "TRANSACTION_TRASHED");

        let (_, trash) = app.send(Method::GET, "/api/v1/transactions/trash", None).await;
        assert_eq!(trash["transactions"][0]["id"], id.as_str());
        assert_eq!(trash["transactions"][0]["state"]["status"], "trashed");

        let restore = format!("{uri}/restore");
        let (status, body) = app.send(Method::POST, &restore, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"]["status"], "active");
        assert_eq!(balance(&app, &account).await, "850");

        // Restoring an active transaction changes nothing.
        let (status, _) = app.send(Method::POST, &restore, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(balance(&app, &account).await, "850");

        let (_, active) = app.send(Method::GET, "/api/v1/transactions", None).await;
        assert_eq!(active["transactions"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_and_page() {
        let app = TestApp::new();
        let account = app.account("Main").await;
        let mut ids = Vec::new();
        for i in 1..=5 {
            ids.push(app.book(&account, "income", &i.to_string(), "Business").await);
        }

        let (status, body) = app
            .send(Method::GET, &format!("/api/v1/transactions/{}", ids[2]), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], "3");

        let (status, body) = app
            .send(Method::GET, "/api/v1/transactions/page?page=2&per_page=2", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["total"], 5);
        assert_eq!(body["meta"]["total_pages"], 3);
        assert_eq!(body["data"][0]["id"], ids[2].as_str());
        assert_eq!(body["data"][1]["id"], ids[3].as_str());

        let (status, _) = app
            .send(
                Method::GET,
                "/api/v1/transactions/0190b5a4-0000-7000-8000-000000000000",
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
