//! Request and response bodies for the import endpoints
//!
//! Both endpoints take the manifest address as a query parameter:
//!
//! ```text
//! GET /imports/iiif/count?manifest_uri=http://example.org/iiif/book1/manifest
//! GET /imports/iiif/tasks?manifest_uri=http://example.org/iiif/book1/manifest
//! ```
//!
//! Tasks are returned in the bulk-import shape, one `{ "info": { ... } }`
//! object per image:
//!
//! ```json
//! {
//!   "manifest": "http://example.org/iiif/book1/manifest",
//!   "count": 1,
//!   "tasks": [
//!     {
//!       "info": {
//!         "manifest": "http://example.org/iiif/book1/manifest",
//!         "target": "http://example.org/iiif/book1/canvas/p0",
//!         "link": "http://universalviewer.io/uv.html?manifest=http://example.org/iiif/book1/manifest#?cv=0",
//!         "tileSource": "http://example.org/images/book1-page0-img0/info.json",
//!         "url": "http://example.org/images/book1-page0-img0/full/max/0/default.jpg",
//!         "url_m": "http://example.org/images/book1-page0-img0/full/240,/0/default.jpg",
//!         "url_b": "http://example.org/images/book1-page0-img0/full/1024,/0/default.jpg"
//!       }
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::importer::ImportTask;
use crate::observability::MetricsSnapshot;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportQuery {
    pub manifest_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub manifest: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResponse {
    pub manifest: String,
    pub count: usize,
    pub tasks: Vec<ImportTask>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub manifests_validated: u64,
    pub manifests_rejected: u64,
    pub validator_unavailable: u64,
    pub tasks_generated: u64,
}

impl From<MetricsSnapshot> for MetricsResponse {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self {
            manifests_validated: snapshot.manifests_validated,
            manifests_rejected: snapshot.manifests_rejected,
            validator_unavailable: snapshot.validator_unavailable,
            tasks_generated: snapshot.tasks_generated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
