//! Monthly report handler.
//!
//! - GET /v1/ai/monthly-report?year=2025&month=1

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    error::AppError,
    models::analytics::{MonthQuery, MonthlyReport},
    services::report,
    state::AppState,
};

/// Summary, category breakdown and insights for one month.
///
/// Insights come from the engine selected at startup (`AURUM_INSIGHTS_MODE`).
pub async fn monthly_report(
    State(state): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<MonthlyReport>, AppError> {
    let Query(query) = query?;
    let MonthQuery { year, month } = query.validate()?;

    let report = report::monthly_report(&state, year, month).await?;

    Ok(Json(report))
}
