//! Configuration file handling for nodefetch
//!
//! `nodefetch.yaml` is optional; every key has a built-in default. Lookup order:
//! the `--config` flag, the `NODEFETCH_CONFIG` environment variable, then
//! `./nodefetch.yaml` when it exists.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NodefetchError, Result, config, history};
use crate::installer::Dialect;
use crate::resolver::{BATCH_THRESHOLD, DEFAULT_CONFIDENCE};
use crate::scanner::CoreNodeList;

/// Default configuration file name
pub const CONFIG_FILE: &str = "nodefetch.yaml";

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "NODEFETCH_CONFIG";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NODEFETCH_DATA_DIR";

const DATA_DIR: &str = "nodefetch";

/// Contents of `nodefetch.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extra node types treated as built-in, on top of the fixed list
    pub core_nodes: Vec<String>,

    /// Extra prefixes for the loose built-in heuristic
    pub core_prefixes: Vec<String>,

    /// Items per enrichment batch
    pub batch_size: usize,

    /// Confidence assigned to every enriched item
    pub confidence: f64,

    /// Default script dialect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            core_nodes: Vec::new(),
            core_prefixes: Vec::new(),
            batch_size: BATCH_THRESHOLD,
            confidence: DEFAULT_CONFIDENCE,
            dialect: None,
        }
    }
}

impl Config {
    /// Parse and validate configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::ConfigParseFailed` for malformed YAML or unknown keys,
    /// and `NodefetchError::ConfigInvalid` for out-of-range values.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::ConfigReadFailed` if the file cannot be read, otherwise
    /// the errors of [`Config::from_yaml`] with the path filled in.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_yaml(&content).map_err(|e| match e {
            NodefetchError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Find and load the configuration, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Config::load_from`] for whichever file was found. No
    /// file at all is not an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| {
                let local = PathBuf::from(CONFIG_FILE);
                local.is_file().then_some(local)
            });

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                Self::load_from(&path)
            }
            None => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::ConfigInvalid` for a zero batch size or a confidence
    /// outside `[0, 1]`, and `NodefetchError::UnsupportedDialect` for an unknown dialect.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(config::invalid("batch_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(config::invalid(format!(
                "confidence must be between 0 and 1, got {}",
                self.confidence
            )));
        }
        self.dialect()?;
        Ok(())
    }

    /// Configured default dialect
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::UnsupportedDialect` if the name is not recognized.
    pub fn dialect(&self) -> Result<Dialect> {
        self.dialect
            .as_deref()
            .map_or(Ok(Dialect::default()), str::parse)
    }

    /// Built-in node policy extended with the configured extras
    pub fn core_policy(&self) -> CoreNodeList {
        CoreNodeList::builtin()
            .with_nodes(non_blank(&self.core_nodes))
            .with_prefixes(non_blank(&self.core_prefixes))
    }
}

/// An empty prefix would match every node type
fn non_blank(values: &[String]) -> impl Iterator<Item = &str> {
    values.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Data directory for persisted state
///
/// `NODEFETCH_DATA_DIR` when set, else the platform data directory.
///
/// # Errors
///
/// Returns `NodefetchError::HistoryFailed` if the platform has no data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir()
        .ok_or_else(|| history::failed("Could not determine the data directory"))?;
    Ok(base.join(DATA_DIR))
}
