//! Insight Engine - rule-based spending recommendations
//!
//! Given a month of transactions and category budgets, the engine surfaces
//! what deserves attention:
//!
//! - **Anomaly** - expenses far above their category's usual amount
//! - **Budget warning** - categories spent past their ceiling
//! - **Category insight** - keyword tips for an over-budget category
//!   ("6 coffee purchases this month")
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dompet_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new(config.insights.clone());
//! let insights = engine.recommend(&transactions, &budgets)?;
//! ```

pub mod anomaly;
pub mod budget;
pub mod engine;
pub mod types;

pub use anomaly::{AnomalyAnalyzer, CategoryStats};
pub use budget::BudgetAnalyzer;
pub use engine::{AnalysisContext, Analyzer, InsightEngine};
pub use types::{Insight, InsightKind};
