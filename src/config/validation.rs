use super::models::Config;
use crate::humanize::ByteSize;
use thiserror::Error;
use url::Url;

/// Presentation API versions the validation service understands
const SUPPORTED_VERSIONS: &[&str] = &["2.0", "2.1", "3.0"];

const MAX_RESPONSE_BYTES: ByteSize = ByteSize(100 * 1024 * 1024); // 100 MB

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be an http(s) URL, got '{value}'")]
    InvalidUrl { field: String, value: String },

    #[error("Unsupported IIIF presentation version '{0}' (expected one of 2.0, 2.1, 3.0)")]
    UnsupportedVersion(String),

    #[error("Timeout must be positive: {field} = 0")]
    ZeroTimeout { field: String },

    #[error("max_response_bytes ({actual}) must be between 1B and {limit}")]
    ResponseSizeOutOfRange { actual: ByteSize, limit: ByteSize },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_urls(config)?;
    validate_version(config)?;
    validate_http(config)?;
    Ok(())
}

fn validate_urls(config: &Config) -> Result<(), ValidationError> {
    let urls = [
        ("validator.endpoint", &config.validator.endpoint),
        ("viewer.base_url", &config.viewer.base_url),
    ];

    for (field, value) in urls {
        if !is_http_url(value) {
            return Err(ValidationError::InvalidUrl {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    if let Some(proxy) = &config.http.proxy {
        if !is_http_url(proxy) {
            return Err(ValidationError::InvalidUrl {
                field: "http.proxy".to_string(),
                value: proxy.clone(),
            });
        }
    }

    Ok(())
}

fn validate_version(config: &Config) -> Result<(), ValidationError> {
    if !SUPPORTED_VERSIONS.contains(&config.validator.version.as_str()) {
        return Err(ValidationError::UnsupportedVersion(
            config.validator.version.clone(),
        ));
    }

    Ok(())
}

fn validate_http(config: &Config) -> Result<(), ValidationError> {
    if config.http.connect_timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout {
            field: "connect_timeout_secs".to_string(),
        });
    }

    if config.http.request_timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout {
            field: "request_timeout_secs".to_string(),
        });
    }

    let size = config.http.max_response_bytes;
    if size.as_u64() == 0 || size > MAX_RESPONSE_BYTES {
        return Err(ValidationError::ResponseSizeOutOfRange {
            actual: size,
            limit: MAX_RESPONSE_BYTES,
        });
    }

    Ok(())
}

/// Parses as an absolute http(s) URL with a host
pub(crate) fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty())
    })
}
