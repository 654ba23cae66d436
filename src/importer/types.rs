use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::traits::ImportError;

/// IIIF presentation manifest, reduced to what task generation reads
///
/// Identifiers are accepted as `@id` (Presentation 2.x) or `id` (3.x). When
/// both are present `@id` wins. Only the first sequence is decoded; later
/// ones are skipped without type checks.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(rename = "@id", default)]
    at_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "sequences", default, deserialize_with = "first_sequence_only")]
    sequence: Option<Sequence>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub canvases: Vec<Canvas>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Canvas {
    #[serde(rename = "@id", default)]
    at_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub resource: Option<ImageResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageResource {
    #[serde(default)]
    pub service: Option<ImageService>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageService {
    #[serde(rename = "@id", default)]
    at_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

fn resolve_id<'a>(at_id: &'a Option<String>, id: &'a Option<String>) -> Option<&'a str> {
    at_id.as_deref().or(id.as_deref())
}

/// Decode `sequences[0]` and skip the rest
fn first_sequence_only<'de, D>(deserializer: D) -> Result<Option<Sequence>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FirstSequence;

    impl<'de> Visitor<'de> for FirstSequence {
        type Value = Option<Sequence>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of sequences")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let first = seq.next_element::<Sequence>()?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }
    }

    deserializer.deserialize_any(FirstSequence)
}

impl Manifest {
    /// Read a validated manifest document into typed form
    pub fn from_document(document: &Value) -> Result<Self, ImportError> {
        Manifest::deserialize(document).map_err(|e| ImportError::MalformedManifest(e.to_string()))
    }

    pub fn id(&self) -> Option<&str> {
        resolve_id(&self.at_id, &self.id)
    }

    /// The sequence tasks are generated from
    pub fn first_sequence(&self) -> Result<&Sequence, ImportError> {
        self.sequence
            .as_ref()
            .ok_or_else(|| ImportError::MalformedManifest("manifest has no sequences".to_string()))
    }
}

impl Canvas {
    pub fn id(&self) -> Option<&str> {
        resolve_id(&self.at_id, &self.id)
    }

    pub fn require_id(&self, index: usize) -> Result<&str, ImportError> {
        self.id().ok_or_else(|| {
            ImportError::MalformedManifest(format!("sequences[0].canvases[{}].@id is missing", index))
        })
    }
}

impl ImageService {
    pub fn id(&self) -> Option<&str> {
        resolve_id(&self.at_id, &self.id)
    }
}

impl Image {
    pub fn service_id(&self) -> Option<&str> {
        self.resource
            .as_ref()
            .and_then(|r| r.service.as_ref())
            .and_then(ImageService::id)
    }
}

/// Wire envelope returned by the validation service
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationEnvelope {
    #[serde(default)]
    pub okay: Option<Value>,
    /// Re-serialized manifest on success, diagnostic text otherwise
    #[serde(default)]
    pub received: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl ValidationEnvelope {
    pub fn is_okay(&self) -> bool {
        self.okay.as_ref().is_some_and(is_truthy)
    }
}

/// JSON truthiness: `0`, `false`, `null` and empty values are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One importable unit: a single image on a single canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    pub manifest: String,
    pub target: String,
    pub link: String,
    #[serde(rename = "tileSource")]
    pub tile_source: String,
    pub url: String,
    pub url_m: String,
    pub url_b: String,
}

impl TaskInfo {
    /// Derive viewer and Image API URLs for one image
    ///
    /// `canvas_index` is the canvas position in the first sequence and ends up
    /// in the viewer's `cv` fragment. Nothing is URL-escaped.
    pub fn for_image(
        manifest_uri: &str,
        viewer_url: &str,
        canvas_index: usize,
        canvas_id: &str,
        service_id: &str,
    ) -> Self {
        Self {
            manifest: manifest_uri.to_string(),
            target: canvas_id.to_string(),
            link: format!("{}?manifest={}#?cv={}", viewer_url, manifest_uri, canvas_index),
            tile_source: format!("{}/info.json", service_id),
            url: format!("{}/full/max/0/default.jpg", service_id),
            url_m: format!("{}/full/240,/0/default.jpg", service_id),
            url_b: format!("{}/full/1024,/0/default.jpg", service_id),
        }
    }
}

/// Task record in the shape bulk-import hosts store: `{ "info": { ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTask {
    pub info: TaskInfo,
}

impl From<TaskInfo> for ImportTask {
    fn from(info: TaskInfo) -> Self {
        Self { info }
    }
}
