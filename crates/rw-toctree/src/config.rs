//! Navigation configuration.
//!
//! Read from the `[toctree]` table of `rw.toml`. When no path is given the
//! file is searched for in the current directory and its parents; when no
//! file is found the defaults apply.
//!
//! ```toml
//! [toctree]
//! root_doc = "index"
//! exclude = ["genindex", "search"]
//! max_depth = 3
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::node::is_external;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rw.toml";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Top-level layout of `rw.toml`; other tables are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    toctree: TocConfig,
}

/// Navigation tree configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Document whose directives become the root sections.
    pub root_doc: String,
    /// Slugs left out of rendered navigation.
    pub exclude: Vec<String>,
    /// Page nesting limit when rendering; unlimited when `None`.
    pub max_depth: Option<usize>,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            root_doc: "index".to_owned(),
            exclude: vec!["genindex".to_owned(), "search".to_owned()],
            max_depth: None,
        }
    }
}

impl TocConfig {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `rw.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the given file doesn't exist, can't be read or
    /// parsed, or fails validation.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let cwd = std::env::current_dir()?;
        match discover_config(&cwd) {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(
            path = %path.display(),
            root_doc = %config.root_doc,
            "Loaded toctree configuration"
        );
        Ok(config)
    }

    /// Parse and validate the `[toctree]` table of a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document can't be parsed or fails validation.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.toctree.validate()?;
        Ok(file.toctree)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_doc.is_empty() {
            return Err(ConfigError::Validation(
                "toctree.root_doc cannot be empty".to_owned(),
            ));
        }
        if is_external(&self.root_doc) {
            return Err(ConfigError::Validation(
                "toctree.root_doc must be a document slug, not a URL".to_owned(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(ConfigError::Validation(
                "toctree.max_depth must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = TocConfig::default();

        assert_eq!(config.root_doc, "index");
        assert_eq!(config.exclude, vec!["genindex", "search"]);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = TocConfig::from_toml("[server]\nport = 8080\n").unwrap();

        assert_eq!(config, TocConfig::default());
    }

    #[test]
    fn test_partial_table() {
        let config = TocConfig::from_toml("[toctree]\nmax_depth = 2\n").unwrap();

        assert_eq!(config.root_doc, "index");
        assert_eq!(config.max_depth, Some(2));
    }

    #[test]
    fn test_full_table() {
        let toml = r#"
[toctree]
root_doc = "contents"
exclude = ["search"]
max_depth = 3
"#;
        let config = TocConfig::from_toml(toml).unwrap();

        assert_eq!(
            config,
            TocConfig {
                root_doc: "contents".to_owned(),
                exclude: vec!["search".to_owned()],
                max_depth: Some(3),
            }
        );
    }

    #[test]
    fn test_invalid_toml() {
        let err = TocConfig::from_toml("[toctree\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_root_doc_rejected() {
        let err = TocConfig::from_toml("[toctree]\nroot_doc = \"\"\n").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Configuration error: toctree.root_doc cannot be empty"
        );
    }

    #[test]
    fn test_external_root_doc_rejected() {
        let err =
            TocConfig::from_toml("[toctree]\nroot_doc = \"https://example.com\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_zero_max_depth_rejected() {
        let err = TocConfig::from_toml("[toctree]\nmax_depth = 0\n").unwrap_err();

        assert!(err.to_string().contains("max_depth"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[toctree]\nroot_doc = \"start\"\n").unwrap();

        let config = TocConfig::load(Some(&path)).unwrap();

        assert_eq!(config.root_doc, "start");
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = TocConfig::load(Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = discover_config(&nested);

        assert_eq!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();
        std::fs::write(nested.join(CONFIG_FILENAME), "").unwrap();

        let found = discover_config(&nested);

        assert_eq!(found, Some(nested.join(CONFIG_FILENAME)));
    }
}
