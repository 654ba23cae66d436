//! Configuration management for iiifbox
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//!
//! # Usage
//!
//! ```no_run
//! use iiifbox::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Validating against: {}", config.validator.endpoint);
//! ```
//!
//! # Environment Variables
//!
//! Any value can be overridden with `IIIFBOX__<section>__<key>`:
//! - `IIIFBOX__VALIDATOR__ENDPOINT=https://validator.internal/validate`
//! - `IIIFBOX__VIEWER__BASE_URL=https://viewer.example.org/uv.html`
//! - `IIIFBOX__HTTP__MAX_RESPONSE_BYTES=10MB`
//!
//! # Configuration File
//!
//! Read from `config/iiifbox.toml` unless `IIIFBOX_CONFIG` points elsewhere.
//! A missing file is not an error.

mod models;
mod sources;
mod validation;

pub use crate::humanize::ByteSize;
pub use models::{Config, HttpSettings, ServerConfig, ValidatorConfig, ViewerConfig};
pub use validation::ValidationError;
pub(crate) use validation::is_http_url;

use std::sync::Arc;
use thiserror::Error;

use crate::importer::{IiifImporter, ManifestValidator};
use crate::transport::Transport;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Validator client pointed at the configured endpoint
    pub fn manifest_validator(&self, transport: Arc<dyn Transport>) -> ManifestValidator {
        ManifestValidator::new(transport)
            .with_endpoint(&self.validator.endpoint)
            .with_version(&self.validator.version)
    }

    /// Importer for one manifest, wired with the configured validator and viewer
    pub fn importer(
        &self,
        manifest_uri: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> IiifImporter {
        IiifImporter::new(manifest_uri, self.manifest_validator(transport))
            .with_viewer_url(&self.viewer.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{FetchResponse, StaticTransport};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[validator]\nversion = \"2.0\"\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.validator.version, "2.0");
    }

    #[test]
    fn test_validation_runs_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[viewer]\nbase_url = \"not-a-url\"\n").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_unparseable_endpoint_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(
            &config_path,
            "[validator]\nendpoint = \"http://validator .example.org/validate\"\n",
        )
        .unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidUrl { ref field, .. })
                if field == "validator.endpoint"
        ));
    }

    #[test]
    fn test_importer_uses_configured_endpoints() {
        let mut config = Config::default();
        config.validator.endpoint = "https://validator.test/validate".to_string();
        config.validator.version = "3.0".to_string();
        config.viewer.base_url = "https://viewer.test/uv.html".to_string();

        let transport = Arc::new(StaticTransport::new(FetchResponse::text("")));
        let importer = config.importer("http://example.org/m", transport);

        assert_eq!(importer.manifest_uri(), "http://example.org/m");
        assert_eq!(importer.viewer_url(), "https://viewer.test/uv.html");

        let validator = config.manifest_validator(Arc::new(StaticTransport::new(
            FetchResponse::text(""),
        )));
        assert_eq!(validator.endpoint(), "https://validator.test/validate");
        assert_eq!(validator.version(), "3.0");
    }
}
