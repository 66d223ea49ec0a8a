//! Dompet CLI - Personal finance prediction service
//!
//! Usage:
//!   dompet train --data transactions.csv   Train the classifiers
//!   dompet serve --port 5000               Start the API server
//!   dompet classify "Kopi Kenangan"        Classify one description
//!   dompet models                          Show trained artifacts

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Train {
            data,
            model_dir,
            stopwords,
        } => {
            let config = commands::with_model_dir(config, model_dir);
            commands::cmd_train(&config, data, stopwords)
        }
        Commands::Serve {
            host,
            port,
            model_dir,
        } => {
            let mut config = commands::with_model_dir(config, model_dir);
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            commands::cmd_serve(&config).await
        }
        Commands::Classify {
            description,
            model_dir,
        } => commands::cmd_classify(&commands::with_model_dir(config, model_dir), &description),
        Commands::Models { model_dir } => {
            commands::cmd_models(&commands::with_model_dir(config, model_dir))
        }
    }
}
