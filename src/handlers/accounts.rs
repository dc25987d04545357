//! Account HTTP handlers.
//!
//! - GET /v1/accounts - List the demo user's accounts

use crate::{
    error::AppError,
    models::account::{Account, AccountResponse},
    services::users,
    state::AppState,
};
use axum::{Json, extract::State};

/// List all accounts for the demo user.
///
/// # Response
///
/// - **Success (200 OK)**: Array of accounts, oldest first (may be empty)
///
/// ```json
/// [
///   { "id": "550e8400-e29b-41d4-a716-446655440000", "name": "Cash", "currency": "USD" }
/// ]
/// ```
///
/// An unseeded database yields an empty list rather than an error, so the
/// dashboard can render before any data exists.
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, AppError> {
    let Some(user_id) = users::find_user_id(&state.pool, &state.demo_user_email).await? else {
        return Ok(Json(Vec::new()));
    };

    let accounts = sqlx::query_as::<_, Account>(
        r#"
        SELECT id, user_id, name, currency, created_at
        FROM accounts
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}
