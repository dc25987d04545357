//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives and validates HTTP request data (JSON body, query, path)
//! 2. Resolves the demo user and delegates to the service layer
//! 3. Returns HTTP response (JSON, status code)

use axum::{Router, routing::get};

use crate::state::AppState;

/// Account listing endpoint
pub mod accounts;
/// Monthly summary and category breakdown endpoints
pub mod analytics;
/// Category listing endpoint
pub mod categories;
/// Liveness and database connectivity
pub mod health;
/// Combined monthly report with insights
pub mod report;
/// Transaction CRUD endpoints
pub mod transactions;

/// All API routes under the `/v1` prefix, without middleware or state.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/health", get(health::health_check))
        .route("/v1/accounts", get(accounts::list_accounts))
        .route("/v1/categories", get(categories::list_categories))
        .route(
            "/v1/transactions",
            get(transactions::list_transactions).post(transactions::create_transaction),
        )
        .route(
            "/v1/transactions/{id}",
            get(transactions::get_transaction)
                .patch(transactions::update_transaction)
                .delete(transactions::delete_transaction),
        )
        .route(
            "/v1/analytics/monthly-summary",
            get(analytics::monthly_summary),
        )
        .route(
            "/v1/analytics/category-breakdown",
            get(analytics::category_breakdown),
        )
        .route("/v1/ai/monthly-report", get(report::monthly_report))
}
