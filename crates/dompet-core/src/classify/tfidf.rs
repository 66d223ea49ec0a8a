//! TF-IDF vectorization of transaction descriptions

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sparse document vector: (feature index, weight), sorted by index
pub type SparseVector = Vec<(usize, f64)>;

/// Tokens are runs of two or more word characters
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Lowercase a description and split it into tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_pattern()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Term-frequency / inverse-document-frequency vectorizer
///
/// Weights are raw term counts times smoothed idf,
/// `ln((1 + n) / (1 + df)) + 1`, and every vector is L2-normalised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    stop_words: Vec<String>,
    /// Token -> feature index (indices follow sorted token order)
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(stop_words: Vec<String>) -> Self {
        Self {
            stop_words,
            vocabulary: BTreeMap::new(),
            idf: vec![],
        }
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn stop_words(&self) -> &[String] {
        &self.stop_words
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Check that every vocabulary index has an idf weight
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(Error::InvalidData(format!(
                "vectorizer has {} idf weights for {} terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        let out_of_range = self
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= self.idf.len());
        if let Some((term, idx)) = out_of_range {
            return Err(Error::InvalidData(format!(
                "vocabulary term '{}' has out-of-range index {}",
                term, idx
            )));
        }
        Ok(())
    }

    /// Learn vocabulary and idf from the documents, returning their vectors
    pub fn fit_transform(&mut self, docs: &[&str]) -> Result<Vec<SparseVector>> {
        let stop: HashSet<&str> = self.stop_words.iter().map(String::as_str).collect();

        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .map(|doc| {
                tokenize(doc)
                    .into_iter()
                    .filter(|t| !stop.contains(t.as_str()))
                    .collect()
            })
            .collect();

        let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        if terms.is_empty() {
            return Err(Error::Training(
                "empty vocabulary; descriptions may only contain stop words".into(),
            ));
        }

        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i))
            .collect();

        let mut doc_freq = vec![0usize; self.vocabulary.len()];
        for tokens in &tokenized {
            let unique: HashSet<usize> = tokens.iter().filter_map(|t| self.index_of(t)).collect();
            for idx in unique {
                doc_freq[idx] += 1;
            }
        }

        let n = docs.len() as f64;
        self.idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Ok(tokenized.iter().map(|t| self.weigh(t)).collect())
    }

    /// Vectorize a document with the fitted vocabulary; unknown tokens are ignored
    pub fn transform(&self, doc: &str) -> SparseVector {
        self.weigh(&tokenize(doc))
    }

    fn index_of(&self, token: &str) -> Option<usize> {
        self.vocabulary.get(token).copied()
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for idx in tokens.iter().filter_map(|t| self.index_of(t)) {
            *counts.entry(idx).or_insert(0.0) += 1.0;
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        vector.sort_by_key(|(idx, _)| *idx);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }
}
