//! Unusual transaction detection
//!
//! Per expense category, a transaction is flagged when its amount is
//! strictly above `max(mean + k * stddev, floor)`, where stddev is the
//! sample standard deviation of that category's amounts (0 for a single
//! transaction).

use std::collections::BTreeMap;

use super::engine::{AnalysisContext, Analyzer};
use super::types::{Insight, InsightKind};
use crate::currency::format_amount;
use crate::models::Transaction;
use crate::Result;

/// Summary statistics of one category's expense amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
}

impl CategoryStats {
    pub fn from_amounts(amounts: &[f64]) -> Option<Self> {
        if amounts.is_empty() {
            return None;
        }
        let n = amounts.len() as f64;
        let mean = amounts.iter().sum::<f64>() / n;
        let std_dev = if amounts.len() > 1 {
            let ss: f64 = amounts.iter().map(|a| (a - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Some(Self {
            count: amounts.len(),
            mean,
            std_dev,
        })
    }

    pub fn threshold(&self, multiplier: f64, floor: f64) -> f64 {
        (self.mean + multiplier * self.std_dev).max(floor)
    }
}

/// Expense transactions grouped by category, categories sorted
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<&str, Vec<&Transaction>> {
    let mut groups: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        groups.entry(tx.category.as_str()).or_default().push(tx);
    }
    groups
}

pub struct AnomalyAnalyzer;

impl Analyzer for AnomalyAnalyzer {
    fn name(&self) -> &'static str {
        "anomaly"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let mut insights = vec![];

        for (category, txs) in expenses_by_category(ctx.transactions) {
            let amounts: Vec<f64> = txs.iter().map(|t| t.amount).collect();
            let Some(stats) = CategoryStats::from_amounts(&amounts) else {
                continue;
            };
            let threshold =
                stats.threshold(ctx.config.anomaly_std_multiplier, ctx.config.anomaly_floor);

            tracing::trace!(
                category,
                count = stats.count,
                mean = stats.mean,
                std_dev = stats.std_dev,
                threshold,
                "Category spending stats"
            );

            for tx in txs.iter().filter(|t| t.amount > threshold) {
                insights.push(Insight::new(
                    InsightKind::Anomaly,
                    format!(
                        "Transaksi '{}' (Rp {}) terdeteksi tidak biasa untuk kategori '{}'. Rata-rata Anda di kategori ini hanya Rp {}.",
                        tx.description,
                        format_amount(tx.amount),
                        category,
                        format_amount(stats.mean)
                    ),
                ));
            }
        }

        Ok(insights)
    }
}
