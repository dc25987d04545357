//! Derived analytics payloads.
//!
//! Nothing here is persisted. Every value is recomputed from the
//! `transactions` table on each request.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::error::AppError;
use crate::insights::Insight;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 9999;

/// `?year=2025&month=1` query accepted by every monthly endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    pub month: u32,
}

impl MonthQuery {
    pub fn validate(self) -> Result<Self, AppError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(AppError::invalid(format!(
                "year must be between {MIN_YEAR} and {MAX_YEAR}"
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(AppError::invalid("month must be between 1 and 12"));
        }
        Ok(self)
    }
}

/// Income, expense and net for a date range, in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub income_cents: i64,
    pub expense_cents: i64,
    pub net_cents: i64,
}

impl Totals {
    pub fn new(income_cents: i64, expense_cents: i64) -> Self {
        Self {
            income_cents,
            expense_cents,
            net_cents: income_cents - expense_cents,
        }
    }
}

/// Inclusive bounds of the summarized month, as shown to clients.
///
/// Both ends always carry milliseconds, e.g. `2025-01-31T23:59:59.999Z`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(serialize_with = "iso_millis")]
    pub start_date: DateTime<Utc>,
    /// Last millisecond of the month.
    #[serde(serialize_with = "iso_millis")]
    pub end_date: DateTime<Utc>,
}

fn iso_millis<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousMonth {
    pub year: i32,
    pub month: u32,
    pub totals: Totals,
}

/// Month-over-month change in percent.
///
/// `None` (serialized as `null`) means the previous month was zero while the
/// current one is not, so there is no baseline to compare against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeltaPercent {
    pub income: Option<f64>,
    pub expense: Option<f64>,
    pub net: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub range: DateRange,
    pub totals: Totals,
    pub previous_month: PreviousMonth,
    pub delta_percent: DeltaPercent,
}

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category_id: Uuid,
    pub category_name: String,
    pub expense_cents: i64,
}

/// Expense per category for one month, largest first.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub year: i32,
    pub month: u32,
    pub totals: Vec<CategoryTotal>,
}

/// Response body for `GET /v1/ai/monthly-report`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub summary: MonthlySummary,
    pub category_breakdown: CategoryBreakdown,
    pub insights: Vec<Insight>,
}
