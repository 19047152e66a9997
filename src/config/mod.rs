//! Route-table compilation settings.
//!
//! Configuration is an explicit value passed to
//! [`RouteTable::compile_with`](crate::RouteTable::compile_with); nothing is read from
//! process-wide state. It can be built in code or loaded from a JSON document:
//!
//! ```json
//! { "strict": true }
//! ```
//!
//! Every field is optional and defaults to the lenient behavior.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a [`RouterConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read router config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid router config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings applied when a route tree is compiled.
///
/// # Examples
///
/// ```
/// use routetree::RouterConfig;
///
/// let config = RouterConfig::from_json_str(r#"{ "strict": true }"#).unwrap();
/// assert!(config.strict);
/// assert_eq!(RouterConfig::from_json_str("{}").unwrap(), RouterConfig::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Reject duplicate route names and duplicate `(method, pattern)` pairs instead of
    /// logging a warning and letting the first declaration win.
    pub strict: bool,
}

impl RouterConfig {
    /// A configuration with strict duplicate checking enabled.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Parse a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] — the file cannot be read.
    /// - [`ConfigError::Parse`] — the contents are not a valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_lenient() {
        assert!(!RouterConfig::default().strict);
        assert!(RouterConfig::strict().strict);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = RouterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RouterConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = RouterConfig::from_json_str(r#"{ "strcit": true }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            RouterConfig::from_json_str("{ strict: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "routetree-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "strict": true }"#).unwrap();
        let config = RouterConfig::from_path(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap(), RouterConfig::strict());
    }

    #[test]
    fn from_path_reports_missing_file() {
        let err = RouterConfig::from_path("/definitely/not/here/router.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/router.json"))
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_string(&RouterConfig::strict()).unwrap();
        assert_eq!(json, r#"{"strict":true}"#);
    }
}
