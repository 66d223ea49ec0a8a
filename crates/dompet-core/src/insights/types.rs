//! Core types for insights

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of insight the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Nothing to act on
    Info,
    /// A transaction far above its category's usual amount
    Anomaly,
    /// Spending over a category budget
    BudgetWarning,
    /// Habit tip for an over-budget category
    CategoryInsight,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Info => "info",
            InsightKind::Anomaly => "anomaly",
            InsightKind::BudgetWarning => "budget_warning",
            InsightKind::CategoryInsight => "category_insight",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user-facing insight, serialized as `{"type": ..., "message": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(InsightKind::Info, message)
    }
}
