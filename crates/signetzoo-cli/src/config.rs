//! Optional TOML defaults for ranking and prediction parameters.
//!
//! ```toml
//! [pagerank]
//! alpha = 0.85
//! max_iter = 200
//!
//! [negative_rank]
//! beta = 0.5
//!
//! [exponential_rank]
//! mu = 0.1
//!
//! [prediction]
//! dim = 5
//! default = "majority"
//! ```
//!
//! Every section and key is optional. Command-line flags override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use signetzoo::prediction::DefaultSign;
use signetzoo::ranking::{ExponentialRankConfig, PageRankConfig};
use tracing::debug;

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "snz.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnzConfig {
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub negative_rank: NegativeRankConfig,
    #[serde(default)]
    pub exponential_rank: ExponentialRankConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NegativeRankConfig {
    #[serde(default = "default_beta")]
    pub beta: f64,
}

impl Default for NegativeRankConfig {
    fn default() -> Self {
        Self {
            beta: default_beta(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_dim")]
    pub dim: usize,
    #[serde(default)]
    pub default: DefaultSign,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            dim: default_dim(),
            default: DefaultSign::default(),
        }
    }
}

const fn default_beta() -> f64 {
    0.5
}

const fn default_dim() -> usize {
    5
}

/// Load configuration from `explicit`, or from [`DEFAULT_CONFIG_FILE`] in
/// `cwd` when it exists, or fall back to defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<SnzConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(SnzConfig::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = toml::from_str::<SnzConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}
