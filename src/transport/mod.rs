//! Transport abstraction for outbound HTTP
//!
//! The importer never talks to the network directly. It goes through a
//! [`Transport`], which owns timeouts, TLS and proxying. Tests swap in
//! [`StaticTransport`] to serve canned validator responses.

mod http;
mod mock;

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

pub use http::{HttpConfig, ReqwestTransport};
pub use mock::{RecordedRequest, StaticTransport};

pub type HeadersMap = BTreeMap<String, String>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },

    #[error("Response body is not valid {charset}")]
    InvalidEncoding { charset: String },
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// Response handed back by a transport
///
/// Non-success statuses are not errors at this layer; callers decide what a
/// status means for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: HeadersMap,
    pub text: String,
    /// Charset announced by the server, if any
    pub encoding: Option<String>,
}

impl FetchResponse {
    /// Successful JSON response, used mostly by tests
    pub fn json(text: impl Into<String>) -> Self {
        let mut headers = HeadersMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            text: text.into(),
            encoding: Some("utf-8".to_string()),
        }
    }

    /// Successful response with no content type
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: HeadersMap::new(),
            text: text.into(),
            encoding: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking-style fetch capability: one GET, one response
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET to `url` with the given query parameters
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<FetchResponse>;
}

/// Extract the charset parameter from a Content-Type value
pub(crate) fn charset_of(content_type: &str) -> Option<String> {
    let mime: mime::Mime = content_type.parse().ok()?;
    mime.get_param(mime::CHARSET)
        .map(|value| value.as_str().trim_matches('"').to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_of() {
        assert_eq!(
            charset_of("application/json; charset=UTF-8").as_deref(),
            Some("utf-8")
        );
        assert_eq!(
            charset_of("text/html;charset=\"iso-8859-1\"").as_deref(),
            Some("iso-8859-1")
        );
        assert_eq!(
            charset_of("text/plain; format=flowed; charset=us-ascii").as_deref(),
            Some("us-ascii")
        );
        assert_eq!(charset_of("application/json"), None);
        assert_eq!(charset_of("not a content type"), None);
        assert_eq!(charset_of(""), None);
    }

    #[test]
    fn test_fetch_response_constructors() {
        let json = FetchResponse::json("{}");
        assert!(json.is_success());
        assert_eq!(json.headers["content-type"], "application/json");
        assert_eq!(json.encoding.as_deref(), Some("utf-8"));

        let text = FetchResponse::text("bad response");
        assert!(text.headers.is_empty());
        assert!(text.encoding.is_none());
    }
}
