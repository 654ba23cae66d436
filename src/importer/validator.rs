use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::traits::{ImportError, InvalidReason};
use super::types::ValidationEnvelope;
use crate::transport::Transport;

pub const DEFAULT_VALIDATOR_ENDPOINT: &str =
    "http://iiif.io/api/presentation/validator/service/validate";

pub const DEFAULT_PRESENTATION_VERSION: &str = "2.1";

/// Client for the remote IIIF presentation validator
///
/// Cheap to clone; the transport is shared.
#[derive(Clone)]
pub struct ManifestValidator {
    transport: Arc<dyn Transport>,
    endpoint: String,
    version: String,
}

impl fmt::Debug for ManifestValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestValidator")
            .field("endpoint", &self.endpoint)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl ManifestValidator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            endpoint: DEFAULT_VALIDATOR_ENDPOINT.to_string(),
            version: DEFAULT_PRESENTATION_VERSION.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ask the validator about `manifest_uri` and return the manifest it echoes back
    ///
    /// Exactly one request per call. The envelope and the manifest inside it
    /// are decoded in two separate steps.
    pub async fn validate_and_fetch(&self, manifest_uri: &str) -> Result<Value, ImportError> {
        let params = [
            ("url", manifest_uri),
            ("version", self.version.as_str()),
            ("format", "json"),
        ];

        debug!(manifest_uri, endpoint = %self.endpoint, "Validating manifest");

        let response = self.transport.get(&self.endpoint, &params).await?;

        debug!(
            manifest_uri,
            status = response.status,
            size = response.text.len(),
            "Validator responded"
        );

        let result = decode_envelope(&response.text).and_then(decode_payload);

        if let Err(reason) = &result {
            warn!(manifest_uri, %reason, "Manifest failed validation");
        }

        result.map_err(ImportError::from)
    }
}

/// First stage: the outer JSON envelope
fn decode_envelope(text: &str) -> Result<ValidationEnvelope, InvalidReason> {
    let value: Value = serde_json::from_str(text).map_err(|_| InvalidReason::NonJsonResponse)?;

    if !value.is_object() {
        return Err(InvalidReason::MalformedEnvelope);
    }

    let envelope: ValidationEnvelope =
        serde_json::from_value(value).map_err(|_| InvalidReason::MalformedEnvelope)?;

    if envelope.okay.is_none() {
        return Err(InvalidReason::MalformedEnvelope);
    }

    Ok(envelope)
}

/// Second stage: the manifest re-encoded as a string inside `received`
fn decode_payload(envelope: ValidationEnvelope) -> Result<Value, InvalidReason> {
    if !envelope.is_okay() {
        if let Some(error) = &envelope.error {
            debug!(%error, "Validator diagnostic");
        }
        return Err(InvalidReason::Rejected);
    }

    match envelope.received {
        Some(Value::String(payload)) => {
            serde_json::from_str(&payload).map_err(|_| InvalidReason::NonJsonPayload)
        }
        _ => Err(InvalidReason::MalformedEnvelope),
    }
}
