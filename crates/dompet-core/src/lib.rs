//! Dompet Core Library
//!
//! Shared functionality for the Dompet personal finance service:
//! - Transaction description classification (TF-IDF + Naive Bayes)
//! - Offline training from a labeled CSV dataset
//! - Daily spending forecast (weekly seasonal ARIMA)
//! - Rule-based insights: anomalies, budget overruns, category tips
//! - Request coercion and Rupiah formatting
//! - Layered service configuration

pub mod classify;
pub mod config;
pub mod currency;
pub mod error;
pub mod forecast;
pub mod insights;
pub mod models;
pub mod training;

pub use classify::{Classification, Classifier, ModelStore, Prediction, TextClassifier};
pub use config::{
    Config, DeepDiveRule, ForecastSettings, InsightConfig, ModelSettings, ServerSettings,
    TrainingSettings,
};
pub use currency::{format_amount, format_rupiah};
pub use error::{Error, Result};
pub use forecast::{ForecastDay, Predictor, SpendingForecast, SpendingForecaster};
pub use insights::{Insight, InsightEngine, InsightKind};
pub use models::{
    Budget, BudgetInput, RawValue, SpendingInput, SpendingPoint, Transaction, TransactionInput,
};
pub use training::{TrainingOptions, TrainingReport};
