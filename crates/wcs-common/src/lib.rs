//! Common types shared by the WCS protocol crate, the encoder and the service.

pub mod bbox;
pub mod catalogue;
pub mod coverage;
pub mod crs;
pub mod error;
pub mod image;
pub mod metadata;

pub use bbox::BoundingBox;
pub use catalogue::{Layer, LayerKind, OutputFormat, RendererKind, ServiceCatalogue};
pub use coverage::{
    CoverageBackend, CoverageMetadata, CoverageMetadataSource, GeoTransform, LayerEligibility,
};
pub use crs::Projection;
pub use error::{WcsError, WcsResult};
pub use image::{EncodeError, ImageEncoder, RenderedImage};
pub use metadata::Metadata;
