//! Monthly analytics.
//!
//! Totals are computed over UTC calendar months `[start, end)`. TRANSFER
//! transactions move money between the user's own accounts and never count
//! as income or expense.
//!
//! Independent aggregate queries for one request run concurrently on the pool.

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        analytics::{
            CategoryBreakdown, CategoryTotal, DateRange, DeltaPercent, MonthlySummary,
            PreviousMonth, Totals,
        },
        transaction::TransactionType,
    },
};

/// UTC bounds `[start, end)` of a calendar month, `None` for an invalid month.
pub fn month_range(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let start = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.and_hms_opt(0, 0, 0)?;

    Some((Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end)))
}

/// The calendar month before `(year, month)`; January rolls back to December.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Percent change from `previous` to `current`, rounded to two decimals.
///
/// Zero to zero is no change. Any other move away from a zero baseline has
/// no meaningful percentage and yields `None`.
pub fn percent_change(current: i64, previous: i64) -> Option<f64> {
    if previous == 0 {
        return if current == 0 { Some(0.0) } else { None };
    }
    // Nets may sit at opposite ends of the i64 range; subtract in i128.
    let delta = i128::from(current) - i128::from(previous);
    let change = delta as f64 / (previous as f64).abs() * 100.0;
    let rounded = (change * 100.0).round() / 100.0;
    // Normalize -0.0 so it never renders as "-0.00".
    Some(if rounded == 0.0 { 0.0 } else { rounded })
}

fn checked_month_range(year: i32, month: u32) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    month_range(year, month)
        .ok_or_else(|| AppError::invalid(format!("{year}-{month:02} is not a valid month")))
}

async fn sum_by_type(
    pool: &DbPool,
    user_id: Uuid,
    transaction_type: TransactionType,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, AppError> {
    // SUM over BIGINT yields NUMERIC in PostgreSQL, hence the cast.
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(amount_cents), 0)::BIGINT
        FROM transactions
        WHERE user_id = $1
          AND type = $2
          AND occurred_at >= $3
          AND occurred_at < $4
        "#,
    )
    .bind(user_id)
    .bind(transaction_type)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    Ok(total)
}

/// Income and expense totals for `[start, end)`.
pub async fn range_summary(
    pool: &DbPool,
    user_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Totals, AppError> {
    let (income, expense) = tokio::try_join!(
        sum_by_type(pool, user_id, TransactionType::Income, start, end),
        sum_by_type(pool, user_id, TransactionType::Expense, start, end),
    )?;

    Ok(Totals::new(income, expense))
}

/// Totals for a month alongside the previous month and the percent deltas between them.
pub async fn monthly_summary(
    pool: &DbPool,
    user_id: Uuid,
    year: i32,
    month: u32,
) -> Result<MonthlySummary, AppError> {
    let (start, end) = checked_month_range(year, month)?;
    let (prev_year, prev_month) = previous_month(year, month);
    let (prev_start, prev_end) = checked_month_range(prev_year, prev_month)?;

    let (current, previous) = tokio::try_join!(
        range_summary(pool, user_id, start, end),
        range_summary(pool, user_id, prev_start, prev_end),
    )?;

    Ok(MonthlySummary {
        year,
        month,
        range: DateRange {
            start_date: start,
            end_date: end - TimeDelta::milliseconds(1),
        },
        totals: current,
        previous_month: PreviousMonth {
            year: prev_year,
            month: prev_month,
            totals: previous,
        },
        delta_percent: DeltaPercent {
            income: percent_change(current.income_cents, previous.income_cents),
            expense: percent_change(current.expense_cents, previous.expense_cents),
            net: percent_change(current.net_cents, previous.net_cents),
        },
    })
}

/// Expense per category for a month, largest first.
///
/// Uncategorized expenses are excluded. Categories with nothing spent are
/// omitted rather than reported as zero.
pub async fn category_breakdown(
    pool: &DbPool,
    user_id: Uuid,
    year: i32,
    month: u32,
) -> Result<CategoryBreakdown, AppError> {
    let (start, end) = checked_month_range(year, month)?;

    let rows = sqlx::query_as::<_, CategoryTotal>(
        r#"
        SELECT t.category_id,
               COALESCE(c.name, 'Unknown') AS category_name,
               SUM(t.amount_cents)::BIGINT AS expense_cents
        FROM transactions t
        LEFT JOIN categories c
               ON c.id = t.category_id AND c.user_id = t.user_id
        WHERE t.user_id = $1
          AND t.type = $2
          AND t.category_id IS NOT NULL
          AND t.occurred_at >= $3
          AND t.occurred_at < $4
        GROUP BY t.category_id, c.name
        "#,
    )
    .bind(user_id)
    .bind(TransactionType::Expense)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(CategoryBreakdown {
        year,
        month,
        totals: rank_categories(rows),
    })
}

/// Drop empty categories and order by expense descending, then by name.
pub fn rank_categories(mut rows: Vec<CategoryTotal>) -> Vec<CategoryTotal> {
    rows.retain(|row| row.expense_cents > 0);
    rows.sort_by(|a, b| {
        b.expense_cents
            .cmp(&a.expense_cents)
            .then_with(|| a.category_name.cmp(&b.category_name))
            .then_with(|| a.category_id.cmp(&b.category_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_is_half_open() {
        let (start, end) = month_range(2025, 2).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn december_range_ends_in_next_year() {
        let (start, end) = month_range(2024, 12).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn invalid_month_has_no_range() {
        assert!(month_range(2025, 0).is_none());
        assert!(month_range(2025, 13).is_none());
    }

    #[test]
    fn previous_month_rolls_over_year() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(previous_month(2025, 3), (2025, 2));
        assert_eq!(previous_month(2000, 12), (2000, 11));
        for year in 2000..2030 {
            assert_eq!(previous_month(year, 1), (year - 1, 12));
        }
    }

    #[test]
    fn percent_change_zero_baseline() {
        assert_eq!(percent_change(0, 0), Some(0.0));
        assert_eq!(percent_change(500, 0), None);
        assert_eq!(percent_change(-500, 0), None);
    }

    #[test]
    fn percent_change_uses_absolute_baseline() {
        assert_eq!(percent_change(150, 100), Some(50.0));
        assert_eq!(percent_change(50, 100), Some(-50.0));
        // Net moving from -100 to +100 is an improvement of 200%.
        assert_eq!(percent_change(100, -100), Some(200.0));
        assert_eq!(percent_change(-300, -100), Some(-200.0));
    }

    #[test]
    fn percent_change_survives_extreme_nets() {
        let current = Totals::new(i64::MAX, 0).net_cents;
        let previous = Totals::new(0, i64::MAX).net_cents;

        let change = percent_change(current, previous).unwrap();
        assert!(change.is_finite());
        assert_eq!(change, 200.0);
        assert_eq!(percent_change(previous, current), Some(-200.0));
    }

    #[test]
    fn percent_change_rounds_to_two_decimals() {
        assert_eq!(percent_change(1, 3), Some(-66.67));
        assert_eq!(percent_change(2, 3), Some(-33.33));
        assert_eq!(percent_change(100, 100), Some(0.0));
    }

    fn row(name: &str, cents: i64) -> CategoryTotal {
        CategoryTotal {
            category_id: Uuid::new_v4(),
            category_name: name.to_string(),
            expense_cents: cents,
        }
    }

    #[test]
    fn ranking_sorts_descending_and_drops_empty() {
        let ranked = rank_categories(vec![
            row("Transit", 1200),
            row("Gifts", 0),
            row("Groceries", 9000),
            row("Dining", 2500),
        ]);

        let names: Vec<&str> = ranked.iter().map(|r| r.category_name.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Dining", "Transit"]);
        assert!(
            ranked
                .windows(2)
                .all(|pair| pair[0].expense_cents > pair[1].expense_cents)
        );
    }

    #[test]
    fn ranking_breaks_ties_by_name() {
        let ranked = rank_categories(vec![row("Rent", 500), row("Dining", 500)]);
        assert_eq!(ranked[0].category_name, "Dining");
        assert_eq!(ranked[1].category_name, "Rent");
    }
}
