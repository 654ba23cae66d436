//! API utility functions
//!
//! Pure helpers for request processing, kept apart from the handlers so they
//! can be unit tested.

use crate::api::error::ApiError;
use crate::config::is_http_url;

/// Extracts the `manifest_uri` query value
///
/// Rejects a missing or blank value and anything that is not an http(s)
/// URL. The value is otherwise passed through untouched, since it ends up
/// verbatim in generated viewer links.
pub fn require_manifest_uri(value: Option<String>) -> Result<String, ApiError> {
    let uri = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::InvalidQuery("manifest_uri is required".to_string()))?;

    if !is_http_url(&uri) {
        return Err(ApiError::InvalidQuery(format!(
            "manifest_uri must be an http(s) URL, got: {}",
            uri
        )));
    }

    Ok(uri)
}
