use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Default investment target (TZS) the progress page measures against.
pub const DEFAULT_INVESTMENT_TARGET: f64 = 3_000_000_000.0;

/// Optional JSON config file read from the working directory:
///
/// ```json
/// {
///   "investment_target": 3000000000,
///   "dataset_path": "data/records.parquet"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed target the Investment sum is compared against.
    pub investment_target: f64,
    /// Dataset loaded automatically at startup.
    pub dataset_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            investment_target: DEFAULT_INVESTMENT_TARGET,
            dataset_path: None,
        }
    }
}

impl AppConfig {
    pub const FILE_NAME: &'static str = "portfolio-pulse.json";

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text).context("parsing config file")
    }

    /// Config from the working directory; defaults when the file is absent
    /// or malformed (a malformed file is logged, not fatal).
    pub fn load_or_default() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Ignoring invalid {}: {e:#}", Self::FILE_NAME);
                Self::default()
            }
        }
    }
}
