//! reqwest-backed transport

use async_trait::async_trait;
use bytes::BytesMut;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Proxy, Response};
use std::time::Duration;
use tracing::debug;

use super::{FetchResponse, HeadersMap, Result, Transport, TransportError, charset_of};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub max_body_bytes: u64,
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            user_agent: concat!("iiifbox/", env!("CARGO_PKG_VERSION")).to_string(),
            max_body_bytes: 5 * 1024 * 1024,
            proxy: None,
        }
    }
}

/// Transport that performs real HTTP requests
///
/// A single attempt per call. Anything smarter (retries, caching) is left
/// to the caller.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    max_body_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(url) = config.proxy.as_deref() {
            let proxy = Proxy::all(url)
                .map_err(|e| TransportError::InvalidUrl(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<FetchResponse> {
        debug!(url, "Sending request");

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes {
                return Err(TransportError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
        }

        let headers: HeadersMap = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_of);

        let body = read_body(response, self.max_body_bytes).await?;
        let text = decode_body(&body, encoding.as_deref())?;

        debug!(url, status, size = text.len(), "Response received");

        Ok(FetchResponse {
            status,
            headers,
            text,
            encoding,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else {
        TransportError::RequestFailed(e.to_string())
    }
}

/// Read the body chunk by chunk, giving up as soon as `limit` is passed
async fn read_body(mut response: Response, limit: u64) -> Result<BytesMut> {
    let mut body = BytesMut::new();

    while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
        if (body.len() + chunk.len()) as u64 > limit {
            return Err(TransportError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

/// Bodies must be valid UTF-8; ASCII-compatible charsets pass when the content is plain ASCII
fn decode_body(body: &[u8], charset: Option<&str>) -> Result<String> {
    std::str::from_utf8(body)
        .map(str::to_owned)
        .map_err(|_| TransportError::InvalidEncoding {
            charset: charset.unwrap_or("utf-8").to_string(),
        })
}
