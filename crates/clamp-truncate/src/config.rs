//! Truncation configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! gives the stock behavior: two lines of `.a-heading`, `"..."`, half a
//! pixel of tolerance, 150ms resize debounce.
//!
//! ```json
//! { "selector": "h2.card-title", "max_lines": 3, "ellipsis": "…" }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use clamp_css::{Selector, SelectorError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::search::{DEFAULT_ELLIPSIS, DEFAULT_TOLERANCE, SearchOptions};

/// Selector used when none is configured.
pub const DEFAULT_SELECTOR: &str = ".a-heading";

/// Lines kept when none is configured.
pub const DEFAULT_MAX_LINES: u32 = 2;

/// Errors from loading or validating a [`TruncateConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid JSON for this schema.
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    /// The selector does not parse.
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),
    /// `max_lines` was zero.
    #[error("max_lines must be at least 1")]
    ZeroMaxLines,
    /// `tolerance` was negative, NaN or infinite.
    #[error("tolerance must be a finite, non-negative number (got {0})")]
    InvalidTolerance(f32),
}

/// What to truncate and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TruncateConfig {
    /// Elements to clamp.
    pub selector: String,
    /// Maximum rendered lines per element.
    pub max_lines: u32,
    /// Marker appended to truncated text.
    pub ellipsis: String,
    /// Sub-pixel slack when comparing heights.
    pub tolerance: f32,
    /// Resize quiet period in milliseconds.
    pub debounce_ms: u64,
}

impl Default for TruncateConfig {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            selector: DEFAULT_SELECTOR.to_owned(),
            max_lines: DEFAULT_MAX_LINES,
            ellipsis: DEFAULT_ELLIPSIS.to_owned(),
            tolerance: DEFAULT_TOLERANCE,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }
}

impl TruncateConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input or unknown fields,
    /// or a validation error (see [`TruncateConfig::validate`]).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        let _ = config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`TruncateConfig::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every field and return the parsed selector.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field as a [`ConfigError`].
    pub fn validate(&self) -> Result<Selector, ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroMaxLines);
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(Selector::parse(&self.selector)?)
    }

    /// Search options derived from this config.
    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            ellipsis: self.ellipsis.clone(),
            tolerance: self.tolerance,
        }
    }

    /// The resize quiet period.
    #[must_use]
    pub const fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = TruncateConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TruncateConfig::default());
        assert_eq!(config.selector, ".a-heading");
        assert_eq!(config.max_lines, 2);
        assert_eq!(config.debounce_delay(), Duration::from_millis(150));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = TruncateConfig::from_json_str(r#"{"max_lines": 3, "ellipsis": "…"}"#).unwrap();
        assert_eq!(config.max_lines, 3);
        assert_eq!(config.ellipsis, "…");
        assert_eq!(config.tolerance, 0.5);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            TruncateConfig::from_json_str(r#"{"max_lines": 0}"#),
            Err(ConfigError::ZeroMaxLines)
        ));
        assert!(matches!(
            TruncateConfig::from_json_str(r#"{"tolerance": -1.0}"#),
            Err(ConfigError::InvalidTolerance(_))
        ));
        assert!(matches!(
            TruncateConfig::from_json_str(r#"{"selector": "div > p"}"#),
            Err(ConfigError::Selector(_))
        ));
        assert!(matches!(
            TruncateConfig::from_json_str(r#"{"max_line": 3}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = TruncateConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
