//! Offline classification command

use anyhow::{Context, Result};
use dompet_core::{Config, ModelStore};

pub fn cmd_classify(config: &Config, description: &str) -> Result<()> {
    let models = ModelStore::load(&config.models).with_context(|| {
        format!(
            "Could not load models from {}. Run `dompet train` first",
            config.models.dir.display()
        )
    })?;

    let result = models.classify(description)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
