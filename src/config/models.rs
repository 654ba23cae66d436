use crate::humanize::ByteSize;
use crate::importer::{DEFAULT_PRESENTATION_VERSION, DEFAULT_VALIDATOR_ENDPOINT, DEFAULT_VIEWER_URL};
use crate::transport::HttpConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub validator: ValidatorConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub http: HttpSettings,
}

/// HTTP API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// Remote IIIF validation service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidatorConfig {
    #[serde(default = "default_validator_endpoint")]
    pub endpoint: String,
    /// IIIF Presentation API version sent to the validator
    #[serde(default = "default_presentation_version")]
    pub version: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_validator_endpoint(),
            version: default_presentation_version(),
        }
    }
}

fn default_validator_endpoint() -> String {
    DEFAULT_VALIDATOR_ENDPOINT.to_string()
}

fn default_presentation_version() -> String {
    DEFAULT_PRESENTATION_VERSION.to_string()
}

/// Viewer that generated task links point into
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewerConfig {
    #[serde(default = "default_viewer_url")]
    pub base_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: default_viewer_url(),
        }
    }
}

fn default_viewer_url() -> String {
    DEFAULT_VIEWER_URL.to_string()
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: ByteSize,
    pub proxy: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            max_response_bytes: default_max_response_bytes(),
            proxy: None,
        }
    }
}

impl HttpSettings {
    pub fn to_http_config(&self) -> HttpConfig {
        HttpConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
            max_body_bytes: self.max_response_bytes.as_u64(),
            proxy: self.proxy.clone(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    concat!("iiifbox/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_response_bytes() -> ByteSize {
    ByteSize(5 * 1024 * 1024) // 5 MB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.validator.endpoint, DEFAULT_VALIDATOR_ENDPOINT);
        assert_eq!(config.validator.version, "2.1");
        assert_eq!(config.viewer.base_url, "http://universalviewer.io/uv.html");
        assert_eq!(config.http.max_response_bytes.as_u64(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_http_settings_conversion() {
        let settings = HttpSettings {
            connect_timeout_secs: 3,
            request_timeout_secs: 7,
            proxy: Some("http://proxy:3128".to_string()),
            ..HttpSettings::default()
        };

        let http = settings.to_http_config();
        assert_eq!(http.connect_timeout, Duration::from_secs(3));
        assert_eq!(http.request_timeout, Duration::from_secs(7));
        assert_eq!(http.max_body_bytes, 5 * 1024 * 1024);
        assert_eq!(http.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[validator]
version = "3.0"

[http]
max_response_bytes = "1MB"
            "#,
        )
        .unwrap();

        assert_eq!(config.validator.version, "3.0");
        assert_eq!(config.validator.endpoint, DEFAULT_VALIDATOR_ENDPOINT);
        assert_eq!(config.http.max_response_bytes.as_u64(), 1024 * 1024);
        assert_eq!(config.http.request_timeout_secs, 60);
    }
}
