//! Transaction HTTP handlers.
//!
//! This module implements transaction-related API endpoints:
//! - GET /v1/transactions - List with filters and pagination
//! - POST /v1/transactions - Record a transaction
//! - GET /v1/transactions/{id} - Get transaction details
//! - PATCH /v1/transactions/{id} - Partially update a transaction
//! - DELETE /v1/transactions/{id} - Delete a transaction
//!
//! Request validation always runs before the database is touched.

use crate::{
    error::AppError,
    models::transaction::{
        CreateTransactionRequest, ListTransactionsQuery, TransactionResponse,
        UpdateTransactionRequest,
    },
    services::{transactions, users},
    state::AppState,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

/// List transactions, newest first.
///
/// # Query Parameters
///
/// - `accountId`, `categoryId`: optional UUID filters
/// - `from`, `to`: optional inclusive ISO 8601 bounds on `occurredAt`
/// - `limit`: 1..=200, defaults to 50
/// - `offset`: >= 0, defaults to 0
pub async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionResponse>>, AppError> {
    let Query(query) = query?;
    let filter = query.validate()?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    let rows = transactions::list_transactions(&state.pool, user_id, &filter).await?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// Record a transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "accountId": "550e8400-...",
///   "type": "EXPENSE",
///   "amountCents": 1299,
///   "occurredAt": "2025-01-15T12:30:00Z",
///   "merchant": "Whole Foods"
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the stored transaction
/// - **400**: `amountCents` below 1, unknown `type`, bad `occurredAt`, malformed JSON
/// - **404**: account or category not owned by the demo user
pub async fn create_transaction(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionResponse>), AppError> {
    let Json(request) = payload?;
    let new = request.validate()?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    let transaction = transactions::create_transaction(&state.pool, user_id, new).await?;

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

/// Get transaction by ID.
///
/// Returns 404 if the transaction does not exist or belongs to another user.
pub async fn get_transaction(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Path(transaction_id) = path?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    let transaction = transactions::get_transaction(&state.pool, user_id, transaction_id).await?;

    Ok(Json(transaction.into()))
}

/// Partially update a transaction.
///
/// Only fields present in the body change. Supplied fields are validated
/// like on create, and a new `accountId`/`categoryId` must belong to the user.
pub async fn update_transaction(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Json<TransactionResponse>, AppError> {
    let Path(transaction_id) = path?;
    let Json(request) = payload?;
    let changes = request.validate()?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    let transaction =
        transactions::update_transaction(&state.pool, user_id, transaction_id, changes).await?;

    Ok(Json(transaction.into()))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

/// Delete a transaction.
///
/// # Response (200 OK)
///
/// ```json
/// { "ok": true }
/// ```
pub async fn delete_transaction(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DeleteResponse>, AppError> {
    let Path(transaction_id) = path?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    transactions::delete_transaction(&state.pool, user_id, transaction_id).await?;

    Ok(Json(DeleteResponse { ok: true }))
}
