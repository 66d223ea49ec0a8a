//! Budget overruns and category deep dives

use super::engine::{AnalysisContext, Analyzer};
use super::types::{Insight, InsightKind};
use crate::config::DeepDiveRule;
use crate::currency::format_amount;
use crate::models::Transaction;
use crate::Result;

/// Warns about every budget whose spending exceeds its ceiling, followed by
/// any deep-dive tips for that category
pub struct BudgetAnalyzer;

impl Analyzer for BudgetAnalyzer {
    fn name(&self) -> &'static str {
        "budget"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let mut insights = vec![];

        for budget in ctx.budgets {
            let Some(over) = budget.overage() else {
                continue;
            };
            insights.push(Insight::new(
                InsightKind::BudgetWarning,
                format!(
                    "Anda MELEBIHI anggaran '{}' sebesar Rp {}!",
                    budget.category,
                    format_amount(over)
                ),
            ));

            let descriptions = category_descriptions(ctx.transactions, &budget.category);
            if descriptions.is_empty() {
                continue;
            }
            for rule in ctx
                .config
                .deep_dive
                .iter()
                .filter(|r| r.category == budget.category)
            {
                let count = rule_count(rule, &descriptions);
                if count > ctx.config.deep_dive_min_count {
                    insights.push(Insight::new(
                        InsightKind::CategoryInsight,
                        rule.message.replace("{count}", &count.to_string()),
                    ));
                }
            }
        }

        Ok(insights)
    }
}

/// Lowercased descriptions of the category's expense transactions
fn category_descriptions(transactions: &[Transaction], category: &str) -> Vec<String> {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.category == category)
        .map(|t| t.description.to_lowercase())
        .collect()
}

/// Sum over keyword sets of the descriptions containing any keyword of the set
pub fn rule_count(rule: &DeepDiveRule, descriptions: &[String]) -> usize {
    rule.keyword_sets
        .iter()
        .map(|set| {
            let keywords: Vec<String> = set.iter().map(|k| k.to_lowercase()).collect();
            descriptions
                .iter()
                .filter(|d| keywords.iter().any(|k| d.contains(k.as_str())))
                .count()
        })
        .sum()
}
