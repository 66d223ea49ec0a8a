//! Model artifact listing

use std::path::Path;

use anyhow::Result;
use dompet_core::{Classifier, Config, Error, TextClassifier};

pub fn cmd_models(config: &Config) -> Result<()> {
    println!();
    println!("📦 Dompet Models");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Directory: {}", config.models.dir.display());

    let mut missing = 0;
    for path in [config.models.category_path(), config.models.type_path()] {
        if !show_model(&path)? {
            missing += 1;
        }
    }

    if missing > 0 {
        println!();
        println!("   Run `dompet train` to create the missing model(s).");
    }
    Ok(())
}

/// Print one artifact; returns false when it does not exist
fn show_model(path: &Path) -> Result<bool> {
    println!();
    let model = match TextClassifier::load(path) {
        Ok(model) => model,
        Err(Error::ModelNotFound(_)) => {
            println!("   ❌ {} (not found)", path.display());
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    println!("   ✅ {}", path.display());
    println!("      Target:      {}", model.target);
    println!("      Classes:     {}", model.classes().join(", "));
    println!("      Vocabulary:  {}", model.vocabulary_size());
    println!("      Rows:        {}", model.training_rows);
    println!(
        "      Trained:     {}",
        model.trained_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(fingerprint) = model.fingerprint() {
        println!("      SHA-256:     {}", &fingerprint[..16]);
    }
    Ok(true)
}
