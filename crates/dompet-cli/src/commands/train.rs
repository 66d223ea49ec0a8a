//! Training command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use dompet_core::training::{train, TrainingOptions};
use dompet_core::Config;

pub fn cmd_train(
    config: &Config,
    data: Option<PathBuf>,
    stopwords: Option<PathBuf>,
) -> Result<()> {
    let mut options = TrainingOptions::from_config(config);
    if let Some(data) = data {
        options.dataset = data;
    }
    if stopwords.is_some() {
        options.stopwords = stopwords;
    }

    println!("🧠 Training models from {}", options.dataset.display());

    let report = train(&options).context("Training failed")?;

    println!();
    println!("   Rows loaded:        {}", report.cleaning.loaded);
    println!("   Missing labels:     {}", report.cleaning.dropped_missing);
    println!("   Duplicates:         {}", report.cleaning.dropped_duplicates);
    println!("   Rows used:          {}", report.cleaning.remaining);
    println!();
    println!("   Categories:");
    for (category, count) in &report.category_distribution {
        println!("     {:<24} {:>6}", category, count);
    }
    println!();
    println!(
        "   Types: {} ({} rows)",
        report.type_classes.join(", "),
        report.type_rows
    );
    println!();
    println!("✅ Saved {}", report.category_path.display());
    println!("✅ Saved {}", report.type_path.display());

    Ok(())
}
