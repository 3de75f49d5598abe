//! Service catalogue: the read-only description of everything a WCS
//! endpoint can serve.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Metadata, Projection};

/// Renderer backing an output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RendererKind {
    Gd,
    Agg,
    RawData,
    Other,
}

impl RendererKind {
    /// Only GD, AGG and RAWDATA renderers produce plausible coverage output.
    pub fn is_wcs_eligible(&self) -> bool {
        matches!(self, RendererKind::Gd | RendererKind::Agg | RendererKind::RawData)
    }
}

/// A registered output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputFormat {
    /// Format name as referenced from layer metadata (e.g., "GTiff")
    pub name: String,

    /// MIME type; formats without one are never advertised
    #[serde(default)]
    pub mime_type: Option<String>,

    /// File extension used for content ids (e.g., "tif")
    #[serde(default)]
    pub extension: String,

    pub renderer: RendererKind,
}

impl OutputFormat {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        extension: impl Into<String>,
        renderer: RendererKind,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: Some(mime_type.into()),
            extension: extension.into(),
            renderer,
        }
    }

    /// MIME type, treating an empty string like a missing one.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref().filter(|m| !m.is_empty())
    }
}

/// Kind of data a layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    #[default]
    Raster,
    Point,
    Line,
    Polygon,
}

/// A layer of the catalogue. Exposed as a coverage when eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique layer name, used verbatim as the coverage identifier
    pub name: String,

    #[serde(default)]
    pub kind: LayerKind,

    #[serde(default)]
    pub projection: Projection,

    #[serde(default)]
    pub metadata: Metadata,

    /// Raster source backing the coverage
    #[serde(default)]
    pub data: Option<PathBuf>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LayerKind::Raster,
            projection: Projection::none(),
            metadata: Metadata::new(),
            data: None,
        }
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }
}

/// The service catalogue: service-wide metadata, layers in declaration
/// order, and the registered output formats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalogue {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub projection: Projection,

    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub layers: Vec<Layer>,

    #[serde(default)]
    pub output_formats: Vec<OutputFormat>,
}

impl ServiceCatalogue {
    /// Find a layer by exact (case-sensitive) name.
    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Find an output format by name (case-insensitive).
    pub fn output_format(&self, name: &str) -> Option<&OutputFormat> {
        self.output_formats
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Find an output format by name or MIME type (case-insensitive).
    pub fn output_format_by_name_or_mime(&self, value: &str) -> Option<&OutputFormat> {
        self.output_format(value).or_else(|| {
            self.output_formats.iter().find(|f| {
                f.mime_type()
                    .map(|m| m.eq_ignore_ascii_case(value))
                    .unwrap_or(false)
            })
        })
    }
}
