//! Insight generation for the monthly report.
//!
//! An [`InsightEngine`] turns an aggregated month (summary plus category
//! breakdown) into short observations. Three engines exist:
//!
//! - [`RuleInsightEngine`]: fixed rule set, always available
//! - [`PlaceholderInsightEngine`]: stand-in for generative insights, off by default
//! - [`HybridInsightEngine`]: rule output merged with the placeholder, deduplicated and capped
//!
//! Which one serves requests is decided once at startup by [`build_engine`].

mod hybrid;
mod placeholder;
mod rules;

use std::sync::Arc;

use serde::Serialize;

use crate::config::{InsightsConfig, InsightsMode};
use crate::models::analytics::{CategoryBreakdown, MonthlySummary};

pub use hybrid::HybridInsightEngine;
pub use placeholder::PlaceholderInsightEngine;
pub use rules::{RuleInsightEngine, format_dollars, generate_rule_insights};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Good,
    Error,
}

/// A single observation about a month, generated fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    /// Stable identifier of the rule that produced it, e.g. `saved-this-month`.
    pub id: String,
    pub title: String,
    pub body: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// Everything an engine may look at.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyReportContext<'a> {
    pub summary: &'a MonthlySummary,
    pub category_breakdown: &'a CategoryBreakdown,
}

pub trait InsightEngine: Send + Sync {
    fn generate(&self, context: &MonthlyReportContext<'_>) -> Vec<Insight>;
}

/// Select the engine named by configuration.
pub fn build_engine(config: &InsightsConfig) -> Arc<dyn InsightEngine> {
    match config.insights_mode {
        InsightsMode::Rules => Arc::new(RuleInsightEngine),
        InsightsMode::Hybrid => Arc::new(HybridInsightEngine::new(
            PlaceholderInsightEngine::new(config.llm_placeholder),
            config.insights_max,
        )),
    }
}
