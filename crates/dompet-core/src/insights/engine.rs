//! Insight Engine - runs the analyzers over one request's data

use super::anomaly::AnomalyAnalyzer;
use super::budget::BudgetAnalyzer;
use super::types::Insight;
use crate::config::InsightConfig;
use crate::models::{Budget, Transaction};
use crate::Result;

pub const NO_TRANSACTIONS: &str = "Belum ada transaksi bulan ini.";
pub const HEALTHY: &str = "Data keuangan Anda bulan ini terlihat sehat. Pertahankan!";

/// Context provided to analyzers
pub struct AnalysisContext<'a> {
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
    pub config: &'a InsightConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        budgets: &'a [Budget],
        config: &'a InsightConfig,
    ) -> Self {
        Self {
            transactions,
            budgets,
            config,
        }
    }
}

/// Trait for insight analyzers
pub trait Analyzer: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce insights, in the order they should be shown
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>>;
}

/// Orchestrates the analyzers; output order follows registration order
pub struct InsightEngine {
    config: InsightConfig,
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(InsightConfig::default())
    }
}

impl InsightEngine {
    /// Engine with the built-in anomaly and budget analyzers
    pub fn new(config: InsightConfig) -> Self {
        let mut engine = Self::empty(config);
        engine.register(Box::new(AnomalyAnalyzer));
        engine.register(Box::new(BudgetAnalyzer));
        engine
    }

    pub fn empty(config: InsightConfig) -> Self {
        Self {
            config,
            analyzers: vec![],
        }
    }

    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn analyzer_names(&self) -> Vec<&'static str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    /// Insights for a month of transactions and budgets
    ///
    /// Never returns an empty list: no transactions gives a single "no data"
    /// note, and nothing found gives a single "healthy" note.
    pub fn recommend(
        &self,
        transactions: &[Transaction],
        budgets: &[Budget],
    ) -> Result<Vec<Insight>> {
        if transactions.is_empty() {
            return Ok(vec![Insight::info(NO_TRANSACTIONS)]);
        }

        let ctx = AnalysisContext::new(transactions, budgets, &self.config);
        let mut insights = vec![];

        for analyzer in &self.analyzers {
            match analyzer.analyze(&ctx) {
                Ok(found) => {
                    tracing::debug!(
                        analyzer = analyzer.name(),
                        count = found.len(),
                        "Analysis complete"
                    );
                    insights.extend(found);
                }
                Err(e) => {
                    tracing::warn!(analyzer = analyzer.name(), error = %e, "Analysis failed");
                    return Err(e);
                }
            }
        }

        if insights.is_empty() {
            insights.push(Insight::info(HEALTHY));
        }
        Ok(insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightKind;
    use crate::Error;

    fn expense(description: &str, category: &str, amount: f64) -> Transaction {
        Transaction {
            description: description.to_string(),
            category: category.to_string(),
            kind: "expense".to_string(),
            amount,
            date: None,
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::default();
        assert_eq!(engine.analyzer_names(), vec!["anomaly", "budget"]);
    }

    #[test]
    fn test_no_transactions_short_circuits() {
        let engine = InsightEngine::default();
        let budgets = vec![Budget {
            category: "Transport".to_string(),
            spent: 2.0,
            budget: 1.0,
        }];

        let insights = engine.recommend(&[], &budgets).unwrap();
        assert_eq!(insights, vec![Insight::info(NO_TRANSACTIONS)]);
    }

    #[test]
    fn test_healthy_when_nothing_found() {
        let engine = InsightEngine::default();
        let insights = engine
            .recommend(&[expense("Kopi", "Food & Dining", 25_000.0)], &[])
            .unwrap();
        assert_eq!(insights, vec![Insight::info(HEALTHY)]);
    }

    #[test]
    fn test_anomalies_come_before_budget_warnings() {
        let mut txs: Vec<Transaction> = (0..20)
            .map(|_| expense("Bensin", "Transport", 30_000.0))
            .collect();
        txs.push(expense("Servis mobil", "Transport", 3_000_000.0));
        let budgets = vec![Budget {
            category: "Transport".to_string(),
            spent: 3_600_000.0,
            budget: 1_000_000.0,
        }];

        let insights = InsightEngine::default().recommend(&txs, &budgets).unwrap();
        let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![InsightKind::Anomaly, InsightKind::BudgetWarning]);
        assert!(!insights.iter().any(|i| i.kind == InsightKind::Info));
    }

    struct Failing;

    impl Analyzer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn analyze(&self, _ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
            Err(Error::InvalidData("boom".into()))
        }
    }

    #[test]
    fn test_analyzer_error_propagates() {
        let mut engine = InsightEngine::empty(InsightConfig::default());
        engine.register(Box::new(Failing));
        let result = engine.recommend(&[expense("x", "y", 1.0)], &[]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
