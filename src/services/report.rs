//! Monthly report: summary, category breakdown and insights in one payload.

use crate::{
    error::AppError,
    insights::MonthlyReportContext,
    models::analytics::MonthlyReport,
    services::{analytics, users},
    state::AppState,
};

pub async fn monthly_report(
    state: &AppState,
    year: i32,
    month: u32,
) -> Result<MonthlyReport, AppError> {
    let user_id = users::demo_user_id(&state.pool, &state.demo_user_email).await?;

    let (summary, category_breakdown) = tokio::try_join!(
        analytics::monthly_summary(&state.pool, user_id, year, month),
        analytics::category_breakdown(&state.pool, user_id, year, month),
    )?;

    let insights = state.insights.generate(&MonthlyReportContext {
        summary: &summary,
        category_breakdown: &category_breakdown,
    });
    tracing::debug!(year, month, count = insights.len(), "generated insights");

    Ok(MonthlyReport {
        year,
        month,
        summary,
        category_breakdown,
        insights,
    })
}
