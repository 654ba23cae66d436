use async_trait::async_trait;
use tracing::{debug, info};

use super::traits::{BulkImporter, ImportError};
use super::types::{Manifest, TaskInfo};
use super::validator::ManifestValidator;

pub const DEFAULT_VIEWER_URL: &str = "http://universalviewer.io/uv.html";

/// Importer that turns a IIIF manifest into one task per image
///
/// Holds nothing but the manifest URI and its collaborators; every call
/// re-validates and re-walks the manifest.
#[derive(Debug, Clone)]
pub struct IiifImporter {
    manifest_uri: String,
    validator: ManifestValidator,
    viewer_url: String,
}

impl IiifImporter {
    pub fn new(manifest_uri: impl Into<String>, validator: ManifestValidator) -> Self {
        Self {
            manifest_uri: manifest_uri.into(),
            validator,
            viewer_url: DEFAULT_VIEWER_URL.to_string(),
        }
    }

    /// Base URL of the viewer used for `link`
    pub fn with_viewer_url(mut self, viewer_url: impl Into<String>) -> Self {
        self.viewer_url = viewer_url.into();
        self
    }

    pub fn manifest_uri(&self) -> &str {
        &self.manifest_uri
    }

    pub fn viewer_url(&self) -> &str {
        &self.viewer_url
    }

    pub async fn count_tasks(&self) -> Result<usize, ImportError> {
        let manifest = self.fetch_manifest().await?;
        let count = count_images(&manifest)?;

        debug!(manifest_uri = %self.manifest_uri, count, "Counted tasks");
        Ok(count)
    }

    pub async fn tasks(&self) -> Result<Vec<TaskInfo>, ImportError> {
        let manifest = self.fetch_manifest().await?;
        let tasks = build_tasks(&self.manifest_uri, &self.viewer_url, &manifest)?;

        info!(manifest_uri = %self.manifest_uri, count = tasks.len(), "Generated tasks");
        Ok(tasks)
    }

    async fn fetch_manifest(&self) -> Result<Manifest, ImportError> {
        let document = self.validator.validate_and_fetch(&self.manifest_uri).await?;
        let manifest = Manifest::from_document(&document)?;

        match manifest.id() {
            Some(id) if id != self.manifest_uri => {
                debug!(
                    manifest_uri = %self.manifest_uri,
                    manifest_id = id,
                    "Manifest id differs from requested URI"
                );
            }
            None => debug!(manifest_uri = %self.manifest_uri, "Manifest has no id"),
            _ => {}
        }

        Ok(manifest)
    }
}

#[async_trait]
impl BulkImporter for IiifImporter {
    fn importer_id(&self) -> &'static str {
        "iiif"
    }

    async fn count_tasks(&self) -> Result<usize, ImportError> {
        IiifImporter::count_tasks(self).await
    }

    async fn tasks(&self) -> Result<Vec<TaskInfo>, ImportError> {
        IiifImporter::tasks(self).await
    }
}

fn count_images(manifest: &Manifest) -> Result<usize, ImportError> {
    let sequence = manifest.first_sequence()?;
    Ok(sequence.canvases.iter().map(|c| c.images.len()).sum())
}

/// Walk canvases then images in document order
fn build_tasks(
    manifest_uri: &str,
    viewer_url: &str,
    manifest: &Manifest,
) -> Result<Vec<TaskInfo>, ImportError> {
    let sequence = manifest.first_sequence()?;
    let mut tasks = Vec::with_capacity(count_images(manifest)?);

    for (i, canvas) in sequence.canvases.iter().enumerate() {
        if canvas.images.is_empty() {
            continue;
        }

        let canvas_id = canvas.require_id(i)?;

        for (j, image) in canvas.images.iter().enumerate() {
            let service_id = image.service_id().ok_or_else(|| {
                ImportError::MalformedManifest(format!(
                    "sequences[0].canvases[{}].images[{}].resource.service.@id is missing",
                    i, j
                ))
            })?;

            tasks.push(TaskInfo::for_image(
                manifest_uri,
                viewer_url,
                i,
                canvas_id,
                service_id,
            ));
        }
    }

    Ok(tasks)
}
