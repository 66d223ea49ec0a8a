//! Persisted text classifier: TF-IDF vectorizer followed by multinomial Naive Bayes

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use super::naive_bayes::MultinomialNb;
use super::tfidf::TfidfVectorizer;
use super::Classifier;
use crate::error::{Error, Result};

/// A fitted classifier for one target column, as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextClassifier {
    /// Dataset column this model predicts ("category" or "type")
    pub target: String,
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
    /// SHA-256 of the artifact bytes, filled in on load
    #[serde(skip)]
    fingerprint: Option<String>,
}

impl TextClassifier {
    /// Fit a vectorizer and classifier on descriptions and their labels
    pub fn fit(
        target: &str,
        descriptions: &[&str],
        labels: &[&str],
        stop_words: Vec<String>,
    ) -> Result<Self> {
        let mut vectorizer = TfidfVectorizer::new(stop_words);
        let features = vectorizer.fit_transform(descriptions)?;
        let classifier = MultinomialNb::fit(
            &features,
            labels,
            vectorizer.n_features(),
            MultinomialNb::DEFAULT_ALPHA,
        )?;

        Ok(Self {
            target: target.to_string(),
            trained_at: Utc::now(),
            training_rows: descriptions.len(),
            vectorizer,
            classifier,
            fingerprint: None,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.n_features()
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    /// Write the artifact as JSON, replacing any existing file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let bytes = serde_json::to_vec(self)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        info!(
            target_column = %self.target,
            path = %path.display(),
            classes = self.classes().len(),
            vocabulary = self.vocabulary_size(),
            "Saved classifier"
        );
        Ok(())
    }

    /// Load an artifact written by [`TextClassifier::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ModelNotFound(path.display().to_string()),
            _ => Error::Io(e),
        })?;

        let mut model: TextClassifier = serde_json::from_slice(&bytes)?;
        model
            .vectorizer
            .validate()
            .and_then(|_| model.classifier.validate(model.vocabulary_size()))
            .map_err(|e| match e {
                Error::InvalidData(msg) => {
                    Error::InvalidData(format!("malformed model {}: {}", path.display(), msg))
                }
                other => other,
            })?;
        model.fingerprint = Some(hex::encode(Sha256::digest(&bytes)));
        Ok(model)
    }
}

impl Classifier for TextClassifier {
    fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>> {
        let features = self.vectorizer.transform(text);
        let proba = self.classifier.predict_proba(&features);
        if proba.iter().any(|p| !p.is_finite()) {
            return Err(Error::InvalidData(format!(
                "model '{}' produced non-finite probabilities",
                self.target
            )));
        }
        Ok(proba)
    }
}
