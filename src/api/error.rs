use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::importer::ImportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Import(ImportError::InvalidManifest(_))
            | ApiError::Import(ImportError::MalformedManifest(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Import(ImportError::Transport(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidQuery(_) => "INVALID_QUERY",
            ApiError::Import(ImportError::InvalidManifest(_)) => "INVALID_MANIFEST",
            ApiError::Import(ImportError::MalformedManifest(_)) => "MALFORMED_MANIFEST",
            ApiError::Import(ImportError::Transport(_)) => "UPSTREAM_UNAVAILABLE",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
