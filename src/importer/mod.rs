//! IIIF bulk-task importer
//!
//! Turns the address of a IIIF presentation manifest into import tasks.
//!
//! ## Key Components
//!
//! - [`ManifestValidator`] - Asks the remote validator about a manifest and
//!   decodes its two-stage response
//! - [`IiifImporter`] - Counts and generates tasks from a validated manifest
//! - [`BulkImporter`] - Trait hosts use to hold importers generically
//! - [`TaskInfo`] - Per-image record with viewer and Image API URLs
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use iiifbox::importer::{IiifImporter, ManifestValidator};
//! use iiifbox::transport::{HttpConfig, ReqwestTransport};
//!
//! let transport = Arc::new(ReqwestTransport::new(HttpConfig::default())?);
//! let importer = IiifImporter::new(
//!     "http://example.org/iiif/book1/manifest",
//!     ManifestValidator::new(transport),
//! );
//!
//! let count = importer.count_tasks().await?;
//! let tasks = importer.tasks().await?;
//! ```

mod iiif;
mod traits;
mod types;
mod validator;

pub use iiif::{DEFAULT_VIEWER_URL, IiifImporter};
pub use traits::{BulkImporter, INVALID_MANIFEST_MESSAGE, ImportError, InvalidReason};
pub use types::{
    Canvas, Image, ImageResource, ImageService, ImportTask, Manifest, Sequence, TaskInfo,
    ValidationEnvelope,
};
pub use validator::{DEFAULT_PRESENTATION_VERSION, DEFAULT_VALIDATOR_ENDPOINT, ManifestValidator};
