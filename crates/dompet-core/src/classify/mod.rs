//! Transaction description classification
//!
//! Two independent classifiers are loaded once at startup and shared
//! read-only for the life of the process:
//!
//! - **Category model** - predicts the spending category ("Food & Dining", ...)
//! - **Type model** - predicts the transaction type ("income" / "expense")
//!
//! Both are TF-IDF + multinomial Naive Bayes pipelines trained offline by
//! [`crate::training`]. Anything implementing [`Classifier`] can stand in for
//! them, which is how the server tests run without artifacts on disk.

pub mod model;
pub mod naive_bayes;
pub mod stopwords;
pub mod tfidf;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ModelSettings;
use crate::error::{Error, Result};

pub use model::TextClassifier;

/// A fitted text classifier
pub trait Classifier: Send + Sync {
    /// Labels seen during training, in probability order
    fn classes(&self) -> &[String];

    /// Probability of each class in `classes()` order
    fn predict_proba(&self, text: &str) -> Result<Vec<f64>>;

    /// Most probable label, with its probability as confidence
    fn predict(&self, text: &str) -> Result<Prediction> {
        let proba = self.predict_proba(text)?;
        let classes = self.classes();
        if proba.len() != classes.len() || classes.is_empty() {
            return Err(Error::InvalidData(format!(
                "classifier returned {} probabilities for {} classes",
                proba.len(),
                classes.len()
            )));
        }

        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }

        Ok(Prediction {
            label: classes[best].clone(),
            confidence: proba[best],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// Maximum class probability (not calibrated)
    pub confidence: f64,
}

/// Result of classifying one description with both models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub predicted_category: String,
    pub confidence_category: f64,
    pub predicted_type: String,
    pub confidence_type: f64,
    pub explanation: String,
}

/// The category and type models, immutable after construction
#[derive(Clone)]
pub struct ModelStore {
    category: Arc<dyn Classifier>,
    kind: Arc<dyn Classifier>,
}

impl ModelStore {
    pub fn new(category: Arc<dyn Classifier>, kind: Arc<dyn Classifier>) -> Self {
        Self { category, kind }
    }

    /// Load both artifacts; fails if either file is missing or unreadable
    pub fn load(settings: &ModelSettings) -> Result<Self> {
        let category = TextClassifier::load(&settings.category_path())?;
        info!(
            path = %settings.category_path().display(),
            classes = category.classes().len(),
            "Category model ready"
        );

        let kind = TextClassifier::load(&settings.type_path())?;
        info!(
            path = %settings.type_path().display(),
            classes = kind.classes().len(),
            "Type model ready"
        );

        Ok(Self::new(Arc::new(category), Arc::new(kind)))
    }

    pub fn category_model(&self) -> &dyn Classifier {
        self.category.as_ref()
    }

    pub fn type_model(&self) -> &dyn Classifier {
        self.kind.as_ref()
    }

    /// Run both models on a description
    pub fn classify(&self, description: &str) -> Result<Classification> {
        if description.is_empty() {
            return Err(Error::InvalidData("Missing description".into()));
        }

        let category = self.category.predict(description)?;
        let kind = self.kind.predict(description)?;

        Ok(Classification {
            explanation: explain(&category, &kind),
            predicted_category: category.label,
            confidence_category: category.confidence,
            predicted_type: kind.label,
            confidence_type: kind.confidence,
        })
    }
}

/// "Prediksi: 'Transport' (expense) - Keyakinan: Kat 87.5%, Tipe 99.1%"
fn explain(category: &Prediction, kind: &Prediction) -> String {
    format!(
        "Prediksi: '{}' ({}) - Keyakinan: Kat {:.1}%, Tipe {:.1}%",
        category.label,
        kind.label,
        category.confidence * 100.0,
        kind.confidence * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        classes: Vec<String>,
        proba: Vec<f64>,
    }

    impl Fixed {
        fn new(classes: &[&str], proba: &[f64]) -> Arc<Self> {
            Arc::new(Self {
                classes: classes.iter().map(|c| c.to_string()).collect(),
                proba: proba.to_vec(),
            })
        }
    }

    impl Classifier for Fixed {
        fn classes(&self) -> &[String] {
            &self.classes
        }

        fn predict_proba(&self, _text: &str) -> Result<Vec<f64>> {
            Ok(self.proba.clone())
        }
    }

    #[test]
    fn test_predict_picks_max_probability() {
        let model = Fixed::new(&["Bills", "Shopping", "Transport"], &[0.2, 0.1, 0.7]);
        let prediction = model.predict("gojek").unwrap();
        assert_eq!(prediction.label, "Transport");
        assert_eq!(prediction.confidence, 0.7);
    }

    #[test]
    fn test_predict_tie_prefers_first_class() {
        let model = Fixed::new(&["expense", "income"], &[0.5, 0.5]);
        assert_eq!(model.predict("x").unwrap().label, "expense");
    }

    #[test]
    fn test_predict_rejects_mismatched_output() {
        let model = Fixed::new(&["expense", "income"], &[1.0]);
        assert!(model.predict("x").is_err());
    }

    #[test]
    fn test_classify_builds_explanation() {
        let store = ModelStore::new(
            Fixed::new(&["Food & Dining", "Transport"], &[0.875, 0.125]),
            Fixed::new(&["expense", "income"], &[0.991, 0.009]),
        );

        let result = store.classify("Kopi Kenangan").unwrap();
        assert_eq!(result.predicted_category, "Food & Dining");
        assert_eq!(result.predicted_type, "expense");
        assert_eq!(
            result.explanation,
            "Prediksi: 'Food & Dining' (expense) - Keyakinan: Kat 87.5%, Tipe 99.1%"
        );
    }

    #[test]
    fn test_classify_empty_description() {
        let store = ModelStore::new(
            Fixed::new(&["Transport"], &[1.0]),
            Fixed::new(&["expense"], &[1.0]),
        );
        assert!(store.classify("").is_err());
    }
}
