//! Server command implementation

use anyhow::{Context, Result};
use dompet_core::{Config, ModelStore};
use dompet_server::AppState;

pub async fn cmd_serve(config: &Config) -> Result<()> {
    println!("🚀 Starting Dompet API server...");
    println!("   Models: {}", config.models.dir.display());
    println!(
        "   Listening: http://{}:{}",
        config.server.host, config.server.port
    );

    let models = ModelStore::load(&config.models).with_context(|| {
        format!(
            "Could not load models from {}. Run `dompet train` first",
            config.models.dir.display()
        )
    })?;

    let state = AppState::new(models, config);
    dompet_server::serve(state, &config.server).await
}
