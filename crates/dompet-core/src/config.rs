//! Service configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a layered resolution:
//! 1. Explicit path (e.g. `--config`), if the file exists
//! 2. Override in data dir (~/.local/share/dompet/config.toml)
//! 3. Fall back to embedded defaults (compiled into binary)
//!
//! Environment variables (`DOMPET_MODEL_DIR`, `DOMPET_HOST`, `DOMPET_PORT`)
//! are applied on top of whichever file was used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/dompet.toml");

/// HTTP server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec![],
        }
    }
}

/// Where the trained classifier artifacts live
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub dir: PathBuf,
    pub category_file: String,
    pub type_file: String,
}

impl ModelSettings {
    pub fn category_path(&self) -> PathBuf {
        self.dir.join(&self.category_file)
    }

    pub fn type_path(&self) -> PathBuf {
        self.dir.join(&self.type_file)
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("models"),
            category_file: "category_model.json".to_string(),
            type_file: "type_model.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSettings {
    pub dataset: PathBuf,
    pub stopwords: Option<PathBuf>,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("data/transactions.csv"),
            stopwords: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    /// Days forecast past the last observed day
    pub horizon_days: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self { horizon_days: 30 }
    }
}

/// Thresholds for the insight rules
#[derive(Debug, Clone, PartialEq)]
pub struct InsightConfig {
    /// Standard deviations above the category mean before a transaction is unusual
    pub anomaly_std_multiplier: f64,
    /// Absolute floor for the anomaly threshold
    pub anomaly_floor: f64,
    /// A deep-dive tip fires when its match count is strictly greater than this
    pub deep_dive_min_count: usize,
    /// Tips checked for a category once its budget is exceeded
    pub deep_dive: Vec<DeepDiveRule>,
}

/// Keyword tip for an over-budget category
///
/// Each keyword set is counted separately (descriptions containing any of
/// its keywords, case-insensitive) and the counts are summed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeepDiveRule {
    pub category: String,
    pub keyword_sets: Vec<Vec<String>>,
    /// Tip text; `{count}` is replaced with the match count
    pub message: String,
}

impl DeepDiveRule {
    fn new(category: &str, keyword_sets: &[&[&str]], message: &str) -> Self {
        Self {
            category: category.to_string(),
            keyword_sets: keyword_sets
                .iter()
                .map(|set| set.iter().map(|k| k.to_string()).collect())
                .collect(),
            message: message.to_string(),
        }
    }
}

fn default_deep_dive_rules() -> Vec<DeepDiveRule> {
    vec![
        DeepDiveRule::new(
            "Food & Dining",
            &[&["kopi", "starbucks", "kenangan", "jiwa"]],
            "💡 Tips: Anda memiliki {count} transaksi 'Kopi' bulan ini. Mengurangi jajan kopi bisa sangat membantu anggaran 'Food & Dining'.",
        ),
        DeepDiveRule::new(
            "Food & Dining",
            &[&["gofood", "grabfood"]],
            "💡 Tips: Anda memesan {count} kali via 'Gofood/Grabfood'. Memasak di rumah bisa menghemat banyak.",
        ),
        DeepDiveRule::new(
            "Shopping",
            &[&["shopee"], &["tokopedia"]],
            "💡 Tips: Anda memiliki {count} transaksi di e-commerce bulan ini. Cek kembali keranjang Anda untuk barang yang tidak perlu.",
        ),
    ]
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            anomaly_std_multiplier: 2.5,
            anomaly_floor: 100_000.0,
            deep_dive_min_count: 5,
            deep_dive: default_deep_dive_rules(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub server: ServerSettings,
    pub models: ModelSettings,
    pub training: TrainingSettings,
    pub forecast: ForecastSettings,
    pub insights: InsightConfig,
}

impl Config {
    /// Load config (explicit path, then data-dir override, then embedded defaults)
    /// and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = load_config(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `DOMPET_*` overrides from the given lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty("DOMPET_MODEL_DIR") {
            self.models.dir = PathBuf::from(dir);
        }
        if let Some(host) = non_empty("DOMPET_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("DOMPET_PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("DOMPET_PORT is not a valid port: {}", port)))?;
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("dompet").join("config.toml"))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let candidate = path
        .map(Path::to_path_buf)
        .filter(|p| p.exists())
        .or_else(|| default_config_path().filter(|p| p.exists()));

    let content = match candidate {
        Some(p) => {
            debug!(path = %p.display(), "Loading config file");
            fs::read_to_string(&p)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", p.display(), e)))?
        }
        None => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    server: Option<RawServer>,
    models: Option<RawModels>,
    training: Option<RawTraining>,
    forecast: Option<RawForecast>,
    insights: Option<RawInsights>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawModels {
    dir: Option<PathBuf>,
    category_file: Option<String>,
    type_file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTraining {
    dataset: Option<PathBuf>,
    stopwords: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    horizon_days: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    anomaly_std_multiplier: Option<f64>,
    anomaly_floor: Option<f64>,
    deep_dive_min_count: Option<usize>,
    deep_dive: Option<Vec<DeepDiveRule>>,
}

/// Parse config from TOML content, filling gaps with defaults
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
        if let Some(origins) = server.allowed_origins {
            config.server.allowed_origins = origins;
        }
    }

    if let Some(models) = raw.models {
        if let Some(dir) = models.dir {
            config.models.dir = dir;
        }
        if let Some(file) = models.category_file {
            config.models.category_file = file;
        }
        if let Some(file) = models.type_file {
            config.models.type_file = file;
        }
    }

    if let Some(training) = raw.training {
        if let Some(dataset) = training.dataset {
            config.training.dataset = dataset;
        }
        config.training.stopwords = training.stopwords;
    }

    if let Some(forecast) = raw.forecast {
        if let Some(days) = forecast.horizon_days {
            if days == 0 {
                return Err(Error::Config("forecast.horizon_days must be > 0".into()));
            }
            config.forecast.horizon_days = days;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(mult) = insights.anomaly_std_multiplier {
            config.insights.anomaly_std_multiplier = mult;
        }
        if let Some(floor) = insights.anomaly_floor {
            config.insights.anomaly_floor = floor;
        }
        if let Some(count) = insights.deep_dive_min_count {
            config.insights.deep_dive_min_count = count;
        }
        if let Some(rules) = insights.deep_dive {
            config.insights.deep_dive = rules;
        }
    }

    Ok(config)
}
