//! Stand-in for model-generated insights.
//!
//! No inference happens here. When enabled it emits one fixed insight so the
//! hybrid merge path and the dashboard can be exercised end to end.

use serde_json::json;

use super::{Insight, InsightEngine, MonthlyReportContext, Severity};

pub const PLACEHOLDER_ID: &str = "llm-placeholder";

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderInsightEngine {
    enabled: bool,
}

impl PlaceholderInsightEngine {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl InsightEngine for PlaceholderInsightEngine {
    fn generate(&self, _context: &MonthlyReportContext<'_>) -> Vec<Insight> {
        if !self.enabled {
            return Vec::new();
        }
        vec![Insight {
            id: PLACEHOLDER_ID.to_string(),
            title: "LLM Insight Placeholder".to_string(),
            body: "LLM insight generation scaffold is in place but not enabled yet.".to_string(),
            severity: Severity::Info,
            meta: Some(json!({ "source": PLACEHOLDER_ID })),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::fixtures::{breakdown, summary};

    #[test]
    fn disabled_by_default() {
        let summary = summary(100, 50, None);
        let breakdown = breakdown(&[]);
        let context = MonthlyReportContext {
            summary: &summary,
            category_breakdown: &breakdown,
        };

        assert!(PlaceholderInsightEngine::default().generate(&context).is_empty());

        let enabled = PlaceholderInsightEngine::new(true).generate(&context);
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id, PLACEHOLDER_ID);
        assert_eq!(enabled[0].severity, Severity::Info);
    }
}
