use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use super::types::TaskInfo;
use crate::transport::TransportError;

/// User-facing message for every manifest the validator will not vouch for
pub const INVALID_MANIFEST_MESSAGE: &str = "Oops! That doesn't look like a valid IIIF manifest.";

/// Why a manifest was classified as invalid
///
/// Never part of the error message; available for logging and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Validation service body was not JSON
    NonJsonResponse,
    /// Envelope parsed but its `okay` flag was falsy
    Rejected,
    /// Envelope was JSON but not the expected shape
    MalformedEnvelope,
    /// Envelope said okay but `received` was not a JSON document
    NonJsonPayload,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::NonJsonResponse => "non_json_response",
            InvalidReason::Rejected => "rejected",
            InvalidReason::MalformedEnvelope => "malformed_envelope",
            InvalidReason::NonJsonPayload => "non_json_payload",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Importer errors
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{}", INVALID_MANIFEST_MESSAGE)]
    InvalidManifest(InvalidReason),
    #[error("malformed manifest: {0}")]
    MalformedManifest(String),
    #[error("validation service unavailable: {0}")]
    Transport(#[from] TransportError),
}

impl ImportError {
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            ImportError::InvalidManifest(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<InvalidReason> for ImportError {
    fn from(reason: InvalidReason) -> Self {
        ImportError::InvalidManifest(reason)
    }
}

/// A source of bulk-import tasks
///
/// Every call is independent: implementations hold no state between calls
/// beyond what they were constructed with.
#[async_trait]
pub trait BulkImporter: Send + Sync {
    /// Short identifier a host uses to pick this importer
    fn importer_id(&self) -> &'static str;

    /// Number of tasks `tasks()` would produce
    async fn count_tasks(&self) -> Result<usize, ImportError>;

    /// Materialize every task, in source order
    async fn tasks(&self) -> Result<Vec<TaskInfo>, ImportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_manifest_message_is_fixed() {
        for reason in [
            InvalidReason::NonJsonResponse,
            InvalidReason::Rejected,
            InvalidReason::MalformedEnvelope,
            InvalidReason::NonJsonPayload,
        ] {
            let err = ImportError::from(reason);
            assert_eq!(err.to_string(), INVALID_MANIFEST_MESSAGE);
            assert_eq!(err.invalid_reason(), Some(reason));
        }
    }

    #[test]
    fn test_other_kinds_have_no_reason() {
        let err = ImportError::MalformedManifest("sequences[0]".to_string());
        assert!(err.invalid_reason().is_none());
        assert_eq!(err.to_string(), "malformed manifest: sequences[0]");

        let err = ImportError::from(TransportError::Timeout);
        assert!(matches!(err, ImportError::Transport(TransportError::Timeout)));
    }
}
