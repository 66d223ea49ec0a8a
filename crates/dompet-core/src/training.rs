//! Offline training of the category and type classifiers
//!
//! Pipeline:
//! 1. Load the labeled CSV (`description`, `category`, `type` required)
//! 2. Drop rows with an empty description or category
//! 3. Drop fully duplicated rows (first occurrence kept)
//! 4. Fit one TF-IDF + Naive Bayes model per target and persist both

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::classify::stopwords::resolve_stop_words;
use crate::classify::{Classifier, TextClassifier};
use crate::config::{Config, ModelSettings};
use crate::error::{Error, Result};

pub const DESCRIPTION_COLUMN: &str = "description";
pub const CATEGORY_COLUMN: &str = "category";
pub const TYPE_COLUMN: &str = "type";

/// One cleaned training example
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledRow {
    pub description: String,
    pub category: String,
    /// May be empty; such rows are left out of the type model only
    pub kind: String,
}

/// Row counts through the cleaning steps
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub loaded: usize,
    pub dropped_missing: usize,
    pub dropped_duplicates: usize,
    pub remaining: usize,
}

/// Everything a training run produced
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub cleaning: CleaningReport,
    /// (category, rows), most frequent first
    pub category_distribution: Vec<(String, usize)>,
    pub category_classes: Vec<String>,
    pub type_classes: Vec<String>,
    pub type_rows: usize,
    pub category_path: PathBuf,
    pub type_path: PathBuf,
}

/// Inputs of a training run
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub dataset: PathBuf,
    pub models: ModelSettings,
    /// Replacement for the built-in base stop-word list
    pub stopwords: Option<PathBuf>,
}

impl TrainingOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dataset: config.training.dataset.clone(),
            models: config.models.clone(),
            stopwords: config.training.stopwords.clone(),
        }
    }
}

/// Generate a hash over every field of a record for duplicate detection
fn row_hash(record: &StringRecord) -> String {
    let mut hasher = Sha256::new();
    for field in record.iter() {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Read and clean a labeled dataset
pub fn load_dataset<R: Read>(reader: R) -> Result<(Vec<LabeledRow>, CleaningReport)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let description_idx = column_index(&headers, DESCRIPTION_COLUMN)?;
    let category_idx = column_index(&headers, CATEGORY_COLUMN)?;
    let type_idx = column_index(&headers, TYPE_COLUMN)?;

    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
    let mut report = CleaningReport {
        loaded: records.len(),
        ..Default::default()
    };
    info!(rows = report.loaded, "Loaded dataset");

    let field =
        |record: &StringRecord, idx: usize| record.get(idx).unwrap_or("").trim().to_string();

    let complete: Vec<StringRecord> = records
        .into_iter()
        .filter(|r| !field(r, description_idx).is_empty() && !field(r, category_idx).is_empty())
        .collect();
    report.dropped_missing = report.loaded - complete.len();
    if report.dropped_missing > 0 {
        info!(
            dropped = report.dropped_missing,
            remaining = complete.len(),
            "Dropped rows with empty description/category"
        );
    }

    let before_dedup = complete.len();
    let mut seen = HashSet::new();
    let unique: Vec<StringRecord> = complete
        .into_iter()
        .filter(|r| seen.insert(row_hash(r)))
        .collect();
    report.dropped_duplicates = before_dedup - unique.len();
    if report.dropped_duplicates > 0 {
        info!(
            dropped = report.dropped_duplicates,
            remaining = unique.len(),
            "Dropped duplicate rows"
        );
    }

    let rows: Vec<LabeledRow> = unique
        .iter()
        .map(|r| LabeledRow {
            description: field(r, description_idx),
            category: field(r, category_idx),
            kind: field(r, type_idx),
        })
        .collect();
    report.remaining = rows.len();

    Ok((rows, report))
}

/// Label frequencies, most frequent first (ties alphabetical)
pub fn category_distribution(rows: &[LabeledRow]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.category.as_str()).or_insert(0) += 1;
    }
    let mut dist: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(c, n)| (c.to_string(), n))
        .collect();
    dist.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    dist
}

/// Fit the category and type models on cleaned rows
pub fn fit_models(
    rows: &[LabeledRow],
    stop_words: Vec<String>,
) -> Result<(TextClassifier, TextClassifier)> {
    if rows.is_empty() {
        return Err(Error::Training("no rows left after cleaning".into()));
    }

    info!("Training category model");
    let descriptions: Vec<&str> = rows.iter().map(|r| r.description.as_str()).collect();
    let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    let category = TextClassifier::fit(
        CATEGORY_COLUMN,
        &descriptions,
        &categories,
        stop_words.clone(),
    )?;

    info!("Training type model");
    let typed: Vec<&LabeledRow> = rows.iter().filter(|r| !r.kind.is_empty()).collect();
    if typed.len() < rows.len() {
        warn!(
            skipped = rows.len() - typed.len(),
            "Rows without a type are left out of the type model"
        );
    }
    if typed.is_empty() {
        return Err(Error::Training("no rows with a type label".into()));
    }
    let type_descriptions: Vec<&str> = typed.iter().map(|r| r.description.as_str()).collect();
    let types: Vec<&str> = typed.iter().map(|r| r.kind.as_str()).collect();
    let kind = TextClassifier::fit(TYPE_COLUMN, &type_descriptions, &types, stop_words)?;

    Ok((category, kind))
}

/// Full training run: load, clean, fit, persist
pub fn train(options: &TrainingOptions) -> Result<TrainingReport> {
    info!(path = %options.dataset.display(), "Starting training");

    let file = File::open(&options.dataset).map_err(|e| {
        Error::Training(format!(
            "cannot open dataset {}: {}",
            options.dataset.display(),
            e
        ))
    })?;
    let (rows, cleaning) = load_dataset(file)?;

    let distribution = category_distribution(&rows);
    for (category, count) in &distribution {
        info!(category = %category, rows = count, "Category distribution");
    }

    let stop_words = resolve_stop_words(options.stopwords.as_deref());
    let (category, kind) = fit_models(&rows, stop_words)?;

    let category_path = options.models.category_path();
    let type_path = options.models.type_path();
    category.save(&category_path)?;
    kind.save(&type_path)?;

    info!("Training complete");

    Ok(TrainingReport {
        cleaning,
        category_distribution: distribution,
        category_classes: category.classes().to_vec(),
        type_classes: kind.classes().to_vec(),
        type_rows: kind.training_rows,
        category_path,
        type_path,
    })
}
