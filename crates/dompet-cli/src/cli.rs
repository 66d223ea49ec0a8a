//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Dompet - Transaction classification, spending forecast and insights
#[derive(Parser)]
#[command(name = "dompet")]
#[command(about = "Personal finance prediction service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/dompet/config.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the category and type models from a labeled CSV
    Train {
        /// Labeled dataset with description, category and type columns
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Directory to write the model artifacts to
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Stop-word file replacing the built-in Indonesian list
        #[arg(long)]
        stopwords: Option<PathBuf>,
    },

    /// Start the prediction API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the model artifacts
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },

    /// Classify one description with the trained models
    Classify {
        /// Transaction description, e.g. "Kopi Kenangan"
        description: String,

        /// Directory holding the model artifacts
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },

    /// Show the trained model artifacts
    Models {
        /// Directory holding the model artifacts
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },
}
