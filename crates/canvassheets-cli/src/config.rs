use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use canvassheets_core::FormatConfig;

/// Runner configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path of a JSON `FormatConfig` document
    pub format_config_path: Option<PathBuf>,
    /// Currency symbols replacing the configured set
    pub currency_symbols: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let format_config_path = env::var_os("CANVASSHEETS_CONFIG").map(PathBuf::from);
        let currency_symbols = match env::var("CANVASSHEETS_CURRENCY_SYMBOLS") {
            Ok(raw) => Some(split_symbols(&raw)),
            Err(env::VarError::NotPresent) => None,
            Err(e) => return Err(e).context("CANVASSHEETS_CURRENCY_SYMBOLS is not valid UTF-8"),
        };

        Ok(Self {
            format_config_path,
            currency_symbols,
        })
    }

    /// A path given on the command line replaces the environment's
    pub fn with_format_config_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.format_config_path = path;
        }
        self
    }

    /// Build the format settings: defaults, then the config file, then the
    /// symbol override
    pub fn format_config(&self) -> anyhow::Result<FormatConfig> {
        let mut config = match &self.format_config_path {
            Some(path) => read_format_config(path)?,
            None => FormatConfig::default(),
        };
        if let Some(symbols) = &self.currency_symbols {
            config = config.with_currency_symbols(symbols.iter().cloned());
        }
        Ok(config)
    }
}

fn read_format_config(path: &Path) -> anyhow::Result<FormatConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read format config '{}'", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Invalid format config '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded format config");
    Ok(config)
}

fn split_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
