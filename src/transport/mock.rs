use async_trait::async_trait;
use std::sync::Mutex;

use super::{FetchResponse, Result, Transport, TransportError};

/// A request seen by [`StaticTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Response(FetchResponse),
    Unreachable(String),
}

/// Transport that answers every request with the same canned outcome
///
/// Records each request so tests can assert on what was sent.
#[derive(Debug)]
pub struct StaticTransport {
    canned: Canned,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StaticTransport {
    pub fn new(response: FetchResponse) -> Self {
        Self {
            canned: Canned::Response(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails as if the host could not be reached
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            canned: Canned::Unreachable(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("request log poisoned").len()
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<FetchResponse> {
        let request = RecordedRequest {
            url: url.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };

        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request);

        tracing::debug!(url, "Static transport answering");

        match &self.canned {
            Canned::Response(response) => Ok(response.clone()),
            Canned::Unreachable(message) => Err(TransportError::RequestFailed(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_transport_records_requests() {
        let transport = StaticTransport::new(FetchResponse::text("hello"));

        let response = transport
            .get("http://validator.test/validate", &[("url", "http://a.test/m")])
            .await
            .unwrap();
        assert_eq!(response.text, "hello");

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://validator.test/validate");
        assert_eq!(requests[0].param("url"), Some("http://a.test/m"));
        assert_eq!(requests[0].param("missing"), None);
    }

    #[tokio::test]
    async fn test_requests_recorded_across_tasks() {
        let transport = std::sync::Arc::new(StaticTransport::new(FetchResponse::text("ok")));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let transport = transport.clone();
                tokio::spawn(async move {
                    let page = i.to_string();
                    transport
                        .get("http://validator.test", &[("page", page.as_str())])
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut pages: Vec<String> = transport
            .requests()
            .iter()
            .filter_map(|r| r.param("page").map(str::to_string))
            .collect();
        pages.sort();
        assert_eq!(pages, ["0", "1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_unreachable_transport_fails() {
        let transport = StaticTransport::unreachable("connection refused");

        let result = transport.get("http://validator.test", &[]).await;
        assert!(matches!(result, Err(TransportError::RequestFailed(_))));
        assert_eq!(transport.request_count(), 1);
    }
}
