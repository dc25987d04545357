//! Rule insights merged with the generative placeholder.

use std::collections::HashSet;

use super::{
    Insight, InsightEngine, MonthlyReportContext, PlaceholderInsightEngine, RuleInsightEngine,
};

#[derive(Debug, Clone)]
pub struct HybridInsightEngine {
    rules: RuleInsightEngine,
    placeholder: PlaceholderInsightEngine,
    max_insights: usize,
}

impl HybridInsightEngine {
    /// A cap of zero is treated as one; the merged list is never emptied by configuration.
    pub fn new(placeholder: PlaceholderInsightEngine, max_insights: usize) -> Self {
        Self {
            rules: RuleInsightEngine,
            placeholder,
            max_insights: max_insights.max(1),
        }
    }
}

impl InsightEngine for HybridInsightEngine {
    fn generate(&self, context: &MonthlyReportContext<'_>) -> Vec<Insight> {
        let merged = self
            .rules
            .generate(context)
            .into_iter()
            .chain(self.placeholder.generate(context));
        merge_unique(merged, self.max_insights)
    }
}

/// Keep the first insight for each id, stopping once `max` are collected.
fn merge_unique(insights: impl IntoIterator<Item = Insight>, max: usize) -> Vec<Insight> {
    let mut seen = HashSet::new();
    insights
        .into_iter()
        .filter(|insight| seen.insert(insight.id.clone()))
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::Severity;
    use crate::insights::fixtures::{breakdown, summary};

    fn insight(id: &str, title: &str) -> Insight {
        Insight {
            id: id.to_string(),
            title: title.to_string(),
            body: String::new(),
            severity: Severity::Info,
            meta: None,
        }
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let merged = merge_unique(
            vec![insight("a", "first"), insight("b", "b"), insight("a", "second")],
            10,
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "first");
        assert_eq!(merged[1].id, "b");
    }

    #[test]
    fn output_is_capped() {
        let merged = merge_unique(
            vec![insight("a", ""), insight("b", ""), insight("c", "")],
            2,
        );
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn rules_come_before_placeholder_and_cap_applies() {
        let summary = summary(1000, 1500, Some(-10.0));
        let breakdown = breakdown(&[("Rent", 1500)]);
        let context = MonthlyReportContext {
            summary: &summary,
            category_breakdown: &breakdown,
        };

        let engine = HybridInsightEngine::new(PlaceholderInsightEngine::new(true), 10);
        let ids: Vec<String> = engine.generate(&context).into_iter().map(|i| i.id).collect();
        assert_eq!(
            ids,
            vec![
                "spending-exceeded-income",
                "top-spending-category",
                "mom-net-change",
                "llm-placeholder"
            ]
        );

        let capped = HybridInsightEngine::new(PlaceholderInsightEngine::new(true), 2);
        assert_eq!(capped.generate(&context).len(), 2);

        let zero = HybridInsightEngine::new(PlaceholderInsightEngine::new(true), 0);
        assert_eq!(zero.generate(&context).len(), 1);
    }
}
