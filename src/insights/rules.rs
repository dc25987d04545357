//! Rule-based insights.
//!
//! Each rule inspects the month independently and yields at most one
//! insight. Rules run in the order of [`RULES`] and their results are
//! concatenated, so the output order never depends on input ordering.

use serde_json::json;

use super::{Insight, InsightEngine, MonthlyReportContext, Severity};
use crate::models::analytics::CategoryTotal;

type Rule = fn(&MonthlyReportContext<'_>) -> Option<Insight>;

const RULES: [Rule; 4] = [
    spending_exceeded_income,
    saved_this_month,
    top_spending_category,
    month_over_month_net_change,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleInsightEngine;

impl InsightEngine for RuleInsightEngine {
    fn generate(&self, context: &MonthlyReportContext<'_>) -> Vec<Insight> {
        generate_rule_insights(context)
    }
}

pub fn generate_rule_insights(context: &MonthlyReportContext<'_>) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule(context)).collect()
}

fn spending_exceeded_income(context: &MonthlyReportContext<'_>) -> Option<Insight> {
    let totals = context.summary.totals;
    if totals.expense_cents <= totals.income_cents {
        return None;
    }
    Some(Insight {
        id: "spending-exceeded-income".to_string(),
        title: "Spending Alert".to_string(),
        body: "Spending exceeded income this month.".to_string(),
        severity: Severity::Warn,
        meta: Some(json!({
            "incomeCents": totals.income_cents,
            "expenseCents": totals.expense_cents,
        })),
    })
}

fn saved_this_month(context: &MonthlyReportContext<'_>) -> Option<Insight> {
    let net_cents = context.summary.totals.net_cents;
    if net_cents <= 0 {
        return None;
    }
    Some(Insight {
        id: "saved-this-month".to_string(),
        title: "Savings".to_string(),
        body: format!("You saved {} this month.", format_dollars(net_cents)),
        severity: Severity::Good,
        meta: Some(json!({ "netCents": net_cents })),
    })
}

fn top_spending_category(context: &MonthlyReportContext<'_>) -> Option<Insight> {
    // First category wins on ties.
    let top = context
        .category_breakdown
        .totals
        .iter()
        .fold(None::<&CategoryTotal>, |best, current| match best {
            Some(best) if best.expense_cents >= current.expense_cents => Some(best),
            _ => Some(current),
        })?;

    Some(Insight {
        id: "top-spending-category".to_string(),
        title: "Top Spending Category".to_string(),
        body: format!(
            "Top spending category: {} ({}).",
            top.category_name,
            format_dollars(top.expense_cents)
        ),
        severity: Severity::Info,
        meta: Some(json!({
            "categoryId": top.category_id,
            "expenseCents": top.expense_cents,
        })),
    })
}

fn month_over_month_net_change(context: &MonthlyReportContext<'_>) -> Option<Insight> {
    let summary = context.summary;
    let net_delta = summary.delta_percent.net?;
    let sign = if net_delta > 0.0 { "+" } else { "" };

    Some(Insight {
        id: "mom-net-change".to_string(),
        title: "Month-over-Month".to_string(),
        body: format!("Net cashflow changed {sign}{net_delta:.2}% vs last month."),
        severity: Severity::Info,
        meta: Some(json!({
            "netDeltaPercent": net_delta,
            "previousNetCents": summary.previous_month.totals.net_cents,
            "currentNetCents": summary.totals.net_cents,
        })),
    })
}

/// Format cents as US dollars, e.g. `123456` → `$1,234.56`, `-500` → `-$5.00`.
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{:02}", abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::fixtures::{breakdown, summary};

    fn run(
        summary: &crate::models::analytics::MonthlySummary,
        breakdown: &crate::models::analytics::CategoryBreakdown,
    ) -> Vec<Insight> {
        generate_rule_insights(&MonthlyReportContext {
            summary,
            category_breakdown: breakdown,
        })
    }

    fn find<'a>(insights: &'a [Insight], id: &str) -> Option<&'a Insight> {
        insights.iter().find(|i| i.id == id)
    }

    #[test]
    fn overspending_raises_warning() {
        let insights = run(&summary(1000, 1500, None), &breakdown(&[]));

        let alert = find(&insights, "spending-exceeded-income").expect("warning present");
        assert_eq!(alert.severity, Severity::Warn);
        assert!(find(&insights, "saved-this-month").is_none());
    }

    #[test]
    fn savings_body_shows_formatted_amount() {
        let insights = run(&summary(1500, 1000, None), &breakdown(&[]));

        let saved = find(&insights, "saved-this-month").expect("savings present");
        assert!(saved.body.contains("$5.00"), "body was {}", saved.body);
        assert_eq!(saved.severity, Severity::Good);
        assert!(find(&insights, "spending-exceeded-income").is_none());
    }

    #[test]
    fn break_even_month_yields_neither_alert_nor_savings() {
        let insights = run(&summary(1000, 1000, None), &breakdown(&[]));
        assert!(insights.is_empty());
    }

    #[test]
    fn top_category_picks_largest_regardless_of_order() {
        let insights = run(
            &summary(0, 0, None),
            &breakdown(&[("Dining", 2500), ("Groceries", 9000), ("Transit", 1200)]),
        );

        let top = find(&insights, "top-spending-category").expect("top category present");
        assert_eq!(top.body, "Top spending category: Groceries ($90.00).");
        assert_eq!(top.meta.as_ref().unwrap()["expenseCents"], 9000);
    }

    #[test]
    fn top_category_first_wins_on_tie() {
        let insights = run(
            &summary(0, 0, None),
            &breakdown(&[("Dining", 500), ("Groceries", 500)]),
        );
        let top = find(&insights, "top-spending-category").unwrap();
        assert!(top.body.contains("Dining"));
    }

    #[test]
    fn month_over_month_sign_prefix() {
        let up = run(&summary(0, 0, Some(12.5)), &breakdown(&[]));
        assert_eq!(
            find(&up, "mom-net-change").unwrap().body,
            "Net cashflow changed +12.50% vs last month."
        );

        let down = run(&summary(0, 0, Some(-40.0)), &breakdown(&[]));
        assert_eq!(
            find(&down, "mom-net-change").unwrap().body,
            "Net cashflow changed -40.00% vs last month."
        );

        let flat = run(&summary(0, 0, Some(0.0)), &breakdown(&[]));
        assert_eq!(
            find(&flat, "mom-net-change").unwrap().body,
            "Net cashflow changed 0.00% vs last month."
        );
    }

    #[test]
    fn month_over_month_skipped_without_baseline() {
        let insights = run(&summary(500, 0, None), &breakdown(&[]));
        assert!(find(&insights, "mom-net-change").is_none());
    }

    #[test]
    fn insights_follow_fixed_rule_order() {
        let insights = run(
            &summary(1000, 1500, Some(-25.0)),
            &breakdown(&[("Transit", 100), ("Rent", 1400)]),
        );
        let ids: Vec<&str> = insights.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["spending-exceeded-income", "top-spending-category", "mom-net-change"]
        );

        let saved = run(
            &summary(5000, 1000, Some(10.0)),
            &breakdown(&[("Rent", 1000)]),
        );
        let ids: Vec<&str> = saved.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["saved-this-month", "top-spending-category", "mom-net-change"]
        );
    }

    #[test]
    fn dollars_formatting() {
        assert_eq!(format_dollars(0), "$0.00");
        assert_eq!(format_dollars(5), "$0.05");
        assert_eq!(format_dollars(500), "$5.00");
        assert_eq!(format_dollars(123_456), "$1,234.56");
        assert_eq!(format_dollars(100_000_000), "$1,000,000.00");
        assert_eq!(format_dollars(-1299), "-$12.99");
    }
}
