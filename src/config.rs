use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "rxscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on image size accepted for OCR (10 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "rxscan=info"
}

/// Configuration directory: `<platform config dir>/rxscan/`.
/// `None` when the platform has no notion of a config directory.
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Default config file location.
pub fn config_file() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join("config.json"))
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the parser and the OCR boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// `chrono` format for the date used when a prescription carries none.
    /// Defaults to the US short date ("10/18/2026").
    pub date_format: String,
    /// Strings an OCR collaborator returns instead of text on failure.
    /// Compared case-insensitively after trimming.
    pub ocr_failure_sentinels: Vec<String>,
    /// Correct OCR character confusions in medication names against the
    /// drug lexicon. Off by default: a name missing from the lexicon must
    /// never be rewritten into a different drug.
    pub correct_drug_names: bool,
    pub max_image_bytes: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".into(),
            ocr_failure_sentinels: vec!["no text recognized".into()],
            correct_drug_names: false,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl ParserConfig {
    /// Load and validate a JSON config file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location. A missing file means defaults;
    /// an unreadable or invalid one is logged and replaced by defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = config_file() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded parser config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Ignoring unusable config file, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("date_format must not be empty".into()));
        }
        if self.max_image_bytes == 0 {
            return Err(ConfigError::Invalid("max_image_bytes must be positive".into()));
        }
        Ok(())
    }

    pub fn is_ocr_failure_sentinel(&self, text: &str) -> bool {
        let trimmed = text.trim();
        !trimmed.is_empty()
            && self
                .ocr_failure_sentinels
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(trimmed))
    }
}
