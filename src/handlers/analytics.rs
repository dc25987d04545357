//! Analytics HTTP handlers.
//!
//! - GET /v1/analytics/monthly-summary?year=2025&month=1
//! - GET /v1/analytics/category-breakdown?year=2025&month=1

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    error::AppError,
    models::analytics::{CategoryBreakdown, MonthQuery, MonthlySummary},
    services::{analytics, users},
    state::AppState,
};

/// Income, expense and net for a month, with the previous month and percent deltas.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "year": 2025,
///   "month": 1,
///   "range": { "startDate": "2025-01-01T00:00:00Z", "endDate": "2025-01-31T23:59:59.999Z" },
///   "totals": { "incomeCents": 500000, "expenseCents": 320000, "netCents": 180000 },
///   "previousMonth": {
///     "year": 2024,
///     "month": 12,
///     "totals": { "incomeCents": 0, "expenseCents": 0, "netCents": 0 }
///   },
///   "deltaPercent": { "income": null, "expense": null, "net": null }
/// }
/// ```
///
/// A `null` delta means the previous month was zero and there is no baseline.
pub async fn monthly_summary(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<MonthlySummary>, AppError> {
    let Query(query) = query?;
    let MonthQuery { year, month } = query.validate()?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    let summary = analytics::monthly_summary(&state.pool, user_id, year, month).await?;

    Ok(Json(summary))
}

/// Expense per category for a month, largest first.
///
/// ```json
/// {
///   "year": 2025,
///   "month": 1,
///   "totals": [
///     { "categoryId": "...", "categoryName": "Groceries", "expenseCents": 42000 }
///   ]
/// }
/// ```
pub async fn category_breakdown(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CategoryBreakdown>, AppError> {
    let Query(query) = query?;
    let MonthQuery { year, month } = query.validate()?;

    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;
    let breakdown = analytics::category_breakdown(&state.pool, user_id, year, month).await?;

    Ok(Json(breakdown))
}
