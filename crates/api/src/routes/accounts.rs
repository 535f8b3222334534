//! Account and transfer routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use pocketbook_core::ledger::{Account, TransferReceipt};
use pocketbook_core::transactions::Statement;
use pocketbook_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::ApiError};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/transfer", post(transfer))
        .route("/accounts/{account_id}", get(get_account))
        .route("/accounts/{account_id}/statement", get(statement))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Display name.
    pub name: String,
}

/// Request body for a transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Account to debit.
    pub from_id: AccountId,
    /// Account to credit.
    pub to_id: AccountId,
    /// Positive amount.
    pub amount: Decimal,
}

/// POST `/accounts` - Create an account with a zero balance.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.ledger.create_account(&payload.name)?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// GET `/accounts` - List accounts in creation order.
async fn list_accounts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let accounts = state.ledger.list_accounts()?;
    Ok(Json(json!({ "accounts": accounts })))
}

/// GET `/accounts/{account_id}` - Get one account.
async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<Account>, ApiError> {
    Ok(Json(state.ledger.get_account(account_id)?))
}

/// GET `/accounts/{account_id}/statement` - Balance and active transactions.
async fn statement(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Result<Json<Statement>, ApiError> {
    Ok(Json(state.store.statement(account_id)?))
}

/// POST `/accounts/transfer` - Move money between two accounts.
async fn transfer(
    State(state): State<AppState>,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<TransferReceipt>, ApiError> {
    let receipt = state
        .ledger
        .transfer(payload.from_id, payload.to_id, payload.amount)?;
    Ok(Json(receipt))
}
