//! Configuration management for Mercury.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`MERCURY__` prefix, `__` separator)
//! 2. Config file (`mercury.toml`, prefix overridable)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;
use crate::vocab::fs;

/// Top-level Mercury configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MercuryConfig {
    /// Path to the expanded JSON-LD vocabulary (SHACL shapes).
    #[serde(default)]
    pub vocabulary_path: Option<String>,

    /// Base IRI for newly minted entities.
    #[serde(default = "default_iri_base")]
    pub iri_base: String,

    /// Text search settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Settings for the file-system text search.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of hits requested from the text index.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Types a hit must have to be considered part of the file system.
    #[serde(default = "default_file_system_types")]
    pub file_system_types: Vec<String>,
}

fn default_iri_base() -> String {
    "http://localhost/iri/".to_string()
}

fn default_max_results() -> u32 {
    20
}

fn default_file_system_types() -> Vec<String> {
    vec![
        fs::COLLECTION.to_string(),
        fs::DIRECTORY.to_string(),
        fs::FILE.to_string(),
    ]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            file_system_types: default_file_system_types(),
        }
    }
}

impl Default for MercuryConfig {
    fn default() -> Self {
        Self {
            vocabulary_path: None,
            iri_base: default_iri_base(),
            search: SearchConfig::default(),
        }
    }
}

impl MercuryConfig {
    /// Load from `{file_prefix}.toml` (optional) and `MERCURY__*` environment
    /// variables, e.g. `MERCURY__SEARCH__MAX_RESULTS=50`. Unset keys take
    /// their defaults.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("MERCURY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: MercuryConfig = cfg.try_deserialize()?;
        tracing::debug!(
            file_prefix,
            vocabulary_path = ?loaded.vocabulary_path,
            iri_base = %loaded.iri_base,
            "Configuration loaded"
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MercuryConfig::default();
        assert_eq!(config.vocabulary_path, None);
        assert_eq!(config.iri_base, "http://localhost/iri/");
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.search.file_system_types.len(), 3);
        assert_eq!(config.search.file_system_types[0], fs::COLLECTION);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("does-not-exist");
        let config = MercuryConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.iri_base, default_iri_base());
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "max_results = [").unwrap();

        let prefix = dir.path().join("broken");
        let err = MercuryConfig::load(prefix.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, crate::MercuryError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mercury.toml");
        std::fs::write(
            &path,
            r#"
vocabulary_path = "vocabulary.json"
iri_base = "http://fairspace.com/iri/"

[search]
max_results = 50
"#,
        )
        .unwrap();

        let prefix = dir.path().join("mercury");
        let config = MercuryConfig::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(config.vocabulary_path.as_deref(), Some("vocabulary.json"));
        assert_eq!(config.iri_base, "http://fairspace.com/iri/");
        assert_eq!(config.search.max_results, 50);
        assert_eq!(config.search.file_system_types, default_file_system_types());
    }
}
