use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use super::{
    error::ApiError,
    models::{CountResponse, ImportQuery, MetricsResponse, TasksResponse},
    state::AppState,
    utils::require_manifest_uri,
};
use crate::importer::ImportTask;

/// Task count for a manifest (GET /imports/iiif/count)
///
/// Validates the manifest through the remote validator and counts images
/// without building task records.
pub async fn count_tasks(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let manifest_uri = require_manifest_uri(query.manifest_uri)?;

    let count = state
        .importer(manifest_uri.as_str())
        .count_tasks()
        .await
        .inspect_err(|e| state.metrics.import_failed(e))?;

    state.metrics.manifest_validated();

    Ok(Json(CountResponse {
        manifest: manifest_uri,
        count,
    }))
}

/// Full task list for a manifest (GET /imports/iiif/tasks)
///
/// ## Flow:
/// 1. Require an http(s) `manifest_uri` query parameter
/// 2. Validate the manifest remotely (one request)
/// 3. Walk canvases and images in document order
/// 4. Return every task wrapped as `{ "info": ... }`
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
) -> Result<Json<TasksResponse>, ApiError> {
    let manifest_uri = require_manifest_uri(query.manifest_uri)?;

    let tasks = state
        .importer(manifest_uri.as_str())
        .tasks()
        .await
        .inspect_err(|e| state.metrics.import_failed(e))?;

    state.metrics.manifest_validated();
    state.metrics.tasks_generated(tasks.len());

    info!(manifest_uri = %manifest_uri, count = tasks.len(), "Served import tasks");

    Ok(Json(TasksResponse {
        manifest: manifest_uri,
        count: tasks.len(),
        tasks: tasks.into_iter().map(ImportTask::from).collect(),
    }))
}

/// Counter snapshot (GET /operators/metrics)
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(state.metrics.snapshot().into())
}

/// Health check endpoint (GET /health)
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
