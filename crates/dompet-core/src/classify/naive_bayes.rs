//! Multinomial Naive Bayes over TF-IDF features

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tfidf::SparseVector;
use crate::error::{Error, Result};

/// Fitted multinomial Naive Bayes parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Additive (Laplace) smoothing
    alpha: f64,
    /// Sorted class labels
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `feature_log_prob[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub const DEFAULT_ALPHA: f64 = 1.0;

    /// Fit on document vectors and their labels
    pub fn fit(x: &[SparseVector], y: &[&str], n_features: usize, alpha: f64) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::Training(format!(
                "{} documents but {} labels",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(Error::Training("no training documents".into()));
        }

        let mut class_index: BTreeMap<&str, usize> = BTreeMap::new();
        for label in y {
            class_index.entry(*label).or_insert(0);
        }
        for (i, idx) in class_index.values_mut().enumerate() {
            *idx = i;
        }
        let classes: Vec<String> = class_index.keys().map(|c| c.to_string()).collect();

        let mut class_count = vec![0.0; classes.len()];
        let mut feature_count = vec![vec![0.0; n_features]; classes.len()];
        for (doc, label) in x.iter().zip(y) {
            let c = class_index[label];
            class_count[c] += 1.0;
            for &(feature, weight) in doc {
                feature_count[c][feature] += weight;
            }
        }

        let total: f64 = class_count.iter().sum();
        let class_log_prior = class_count.iter().map(|n| (n / total).ln()).collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let denom = (counts.iter().sum::<f64>() + alpha * n_features as f64).ln();
                counts.iter().map(|fc| (fc + alpha).ln() - denom).collect()
            })
            .collect();

        Ok(Self {
            alpha,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Check that priors and feature log-probabilities line up with the
    /// classes and with a vocabulary of `n_features` terms
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::InvalidData("classifier has no classes".into()));
        }
        if self.class_log_prior.len() != self.classes.len()
            || self.feature_log_prob.len() != self.classes.len()
        {
            return Err(Error::InvalidData(format!(
                "classifier has {} classes, {} priors and {} feature rows",
                self.classes.len(),
                self.class_log_prior.len(),
                self.feature_log_prob.len()
            )));
        }
        if let Some(row) = self.feature_log_prob.iter().find(|r| r.len() != n_features) {
            return Err(Error::InvalidData(format!(
                "feature row has {} entries, expected {}",
                row.len(),
                n_features
            )));
        }
        Ok(())
    }

    /// Unnormalised log posterior for each class
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + x.iter()
                        .map(|&(feature, weight)| weight * log_probs[feature])
                        .sum::<f64>()
            })
            .collect()
    }

    /// Posterior class probabilities, in `classes()` order
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        let jll = self.joint_log_likelihood(x);
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|v| v / sum).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> MultinomialNb {
        // features: 0 = "gaji", 1 = "kopi"
        let x = vec![vec![(0, 1.0)], vec![(0, 1.0)], vec![(1, 1.0)]];
        MultinomialNb::fit(&x, &["income", "income", "expense"], 2, 1.0).unwrap()
    }

    #[test]
    fn test_classes_sorted() {
        assert_eq!(toy().classes(), &["expense".to_string(), "income".to_string()]);
    }

    #[test]
    fn test_priors_follow_label_frequency() {
        let model = toy();
        let proba = model.predict_proba(&vec![]);
        assert!((proba[0] - 1.0 / 3.0).abs() < 1e-9);
        assert!((proba[1] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = toy();
        let proba = model.predict_proba(&vec![(1, 1.0)]);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba[0] > proba[1]);
    }

    #[test]
    fn test_feature_log_prob_smoothing() {
        let model = toy();
        // income: counts [2, 0] + alpha -> [3, 1] / 4
        let income = &model.feature_log_prob[1];
        assert!((income[0] - (3.0f64 / 4.0).ln()).abs() < 1e-12);
        assert!((income[1] - (1.0f64 / 4.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_validate_fitted_model() {
        assert!(toy().validate(2).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_feature_rows() {
        let mut model = toy();
        model.feature_log_prob = vec![vec![0.0], vec![0.0]];
        let err = model.validate(2).unwrap_err();
        assert_eq!(err.kind(), "InvalidData");
    }

    #[test]
    fn test_validate_rejects_missing_priors() {
        let mut model = toy();
        model.class_log_prior.pop();
        assert!(model.validate(2).is_err());
    }

    #[test]
    fn test_mismatched_lengths() {
        let err = MultinomialNb::fit(&[vec![]], &[], 1, 1.0).unwrap_err();
        assert_eq!(err.kind(), "Training");
    }
}
