//! Per-request coverage metadata and the collaborators that provide it.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Layer, ServiceCatalogue, WcsResult};

/// Affine grid-to-world transform, GDAL ordering:
/// `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// North-up transform covering `extent` with an `xsize` x `ysize` grid.
    pub fn from_extent(extent: &BoundingBox, xsize: u32, ysize: u32) -> Self {
        Self([
            extent.min_x,
            extent.width() / xsize as f64,
            0.0,
            extent.max_y,
            0.0,
            -extent.height() / ysize as f64,
        ])
    }

    /// World position of the center of pixel (0, 0).
    pub fn grid_origin(&self) -> (f64, f64) {
        let gt = &self.0;
        (
            gt[0] + gt[1] / 2.0 + gt[2] / 2.0,
            gt[3] + gt[4] / 2.0 + gt[5] / 2.0,
        )
    }

    /// Diagonal scale terms (pixel width, pixel height).
    pub fn grid_offsets(&self) -> (f64, f64) {
        (self.0[1], self.0[5])
    }
}

/// Read-only snapshot describing one coverage. Computed fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMetadata {
    pub xsize: u32,
    pub ysize: u32,
    pub bandcount: u32,
    /// Extent in the native CRS
    pub extent: BoundingBox,
    /// Extent in WGS84 longitude/latitude
    pub wgs84_extent: BoundingBox,
    pub geotransform: GeoTransform,
    pub native_crs_urn: String,
}

/// Computes coverage metadata for a layer.
pub trait CoverageMetadataSource {
    /// Fails with `WcsError::MetadataError` when the layer lacks what is
    /// needed to describe its grid.
    fn coverage_metadata(
        &self,
        catalogue: &ServiceCatalogue,
        layer: &Layer,
    ) -> WcsResult<CoverageMetadata>;
}

/// Decides whether a layer is exposed as a coverage at all.
pub trait LayerEligibility {
    fn is_layer_supported(&self, layer: &Layer) -> bool;
}

/// Both collaborators the document builders need, usually one object.
pub trait CoverageBackend: CoverageMetadataSource + LayerEligibility {}

impl<T: CoverageMetadataSource + LayerEligibility + ?Sized> CoverageBackend for T {}
