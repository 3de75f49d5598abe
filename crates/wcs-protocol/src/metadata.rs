//! Coverage metadata derived from layer configuration.
//!
//! A raster layer describes its grid through metadata:
//! - `wcs_extent`: "minx miny maxx maxy" in the native CRS (required)
//! - `wcs_size`: "xsize ysize", or `wcs_resolution`: "resx resy"
//! - `wcs_bandcount`: number of bands (default 1)
//! - `wcs_wgs84_extent`: geographic extent, needed only when the native CRS
//!   is neither WGS84 nor spherical mercator

use std::f64::consts::PI;

use wcs_common::crs::{is_web_mercator_urn, is_wgs84_urn};
use wcs_common::{
    BoundingBox, CoverageMetadata, CoverageMetadataSource, GeoTransform, Layer, LayerEligibility,
    LayerKind, ServiceCatalogue, WcsError, WcsResult,
};

use crate::crs::resolve_crs;
use crate::ows::NAMESPACES;

/// Half the equatorial circumference of the spherical mercator plane.
const MERCATOR_HALF_EXTENT: f64 = 20037508.34;

/// Computes coverage metadata straight from the catalogue. Raster layers are
/// the only eligible coverages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogueCoverageSource;

impl LayerEligibility for CatalogueCoverageSource {
    fn is_layer_supported(&self, layer: &Layer) -> bool {
        layer.kind == LayerKind::Raster
    }
}

impl CoverageMetadataSource for CatalogueCoverageSource {
    fn coverage_metadata(
        &self,
        catalogue: &ServiceCatalogue,
        layer: &Layer,
    ) -> WcsResult<CoverageMetadata> {
        let md = &layer.metadata;

        let extent = md
            .lookup(NAMESPACES, "extent")
            .ok_or_else(|| WcsError::metadata(&layer.name, "missing required extent"))
            .and_then(|value| {
                BoundingBox::from_extent_string(value)
                    .map_err(|e| WcsError::metadata(&layer.name, e.to_string()))
            })?;

        let (xsize, ysize) = grid_size(layer, &extent)?;

        let bandcount = match md.lookup(NAMESPACES, "bandcount") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    WcsError::metadata(&layer.name, format!("invalid bandcount '{}'", value))
                })?,
            None => 1,
        };

        let native_crs_urn = resolve_crs(catalogue, layer)
            .map(|list| list.first().to_string())
            .ok_or_else(|| WcsError::metadata(&layer.name, "no native CRS defined"))?;

        let wgs84_extent = wgs84_extent(layer, &extent, &native_crs_urn)?;

        Ok(CoverageMetadata {
            xsize,
            ysize,
            bandcount,
            extent,
            wgs84_extent,
            geotransform: GeoTransform::from_extent(&extent, xsize, ysize),
            native_crs_urn,
        })
    }
}

fn grid_size(layer: &Layer, extent: &BoundingBox) -> WcsResult<(u32, u32)> {
    let md = &layer.metadata;

    if let Some(value) = md.lookup(NAMESPACES, "size") {
        return parse_pair(value)
            .and_then(|(x, y)| to_size(x, y))
            .ok_or_else(|| WcsError::metadata(&layer.name, format!("invalid size '{}'", value)));
    }

    if let Some(value) = md.lookup(NAMESPACES, "resolution") {
        return parse_pair(value)
            .filter(|(rx, ry)| *rx > 0.0 && *ry > 0.0)
            .and_then(|(rx, ry)| {
                to_size(
                    (extent.width() / rx + 0.5).floor(),
                    (extent.height() / ry + 0.5).floor(),
                )
            })
            .ok_or_else(|| {
                WcsError::metadata(&layer.name, format!("invalid resolution '{}'", value))
            });
    }

    Err(WcsError::metadata(
        &layer.name,
        "missing required size or resolution",
    ))
}

fn parse_pair(value: &str) -> Option<(f64, f64)> {
    let mut parts = value.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Some((a, b)),
        _ => None,
    }
}

fn to_size(x: f64, y: f64) -> Option<(u32, u32)> {
    let valid = |v: f64| v >= 1.0 && v <= u32::MAX as f64 && v.fract() == 0.0;
    if valid(x) && valid(y) {
        Some((x as u32, y as u32))
    } else {
        None
    }
}

fn wgs84_extent(layer: &Layer, extent: &BoundingBox, native_urn: &str) -> WcsResult<BoundingBox> {
    if let Some(value) = layer.metadata.lookup(NAMESPACES, "wgs84_extent") {
        return BoundingBox::from_extent_string(value)
            .map_err(|e| WcsError::metadata(&layer.name, e.to_string()));
    }

    if is_wgs84_urn(native_urn) {
        return Ok(*extent);
    }

    if is_web_mercator_urn(native_urn) {
        let (min_x, min_y) = mercator_to_wgs84(extent.min_x, extent.min_y);
        let (max_x, max_y) = mercator_to_wgs84(extent.max_x, extent.max_y);
        return Ok(BoundingBox::new(min_x, min_y, max_x, max_y));
    }

    Err(WcsError::metadata(
        &layer.name,
        format!("cannot derive WGS84 extent from {}", native_urn),
    ))
}

/// Convert spherical mercator (EPSG:3857) coordinates to WGS84 degrees.
fn mercator_to_wgs84(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / MERCATOR_HALF_EXTENT) * 180.0;
    let lat = (y / MERCATOR_HALF_EXTENT) * 180.0;
    let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcs_common::{Metadata, Projection};

    fn raster(md: Metadata) -> Layer {
        Layer::new("dem")
            .with_projection(Projection::new("EPSG:4326"))
            .with_metadata(md)
    }

    #[test]
    fn test_metadata_from_size() {
        let layer = raster(
            Metadata::new()
                .with("wcs_extent", "0 -10 10 0")
                .with("wcs_size", "10 10"),
        );
        let cm = CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .unwrap();

        assert_eq!((cm.xsize, cm.ysize, cm.bandcount), (10, 10, 1));
        assert_eq!(cm.geotransform.0, [0.0, 1.0, 0.0, 0.0, 0.0, -1.0]);
        assert_eq!(cm.native_crs_urn, "urn:ogc:def:crs:EPSG::4326");
        assert_eq!(cm.wgs84_extent, cm.extent);
    }

    #[test]
    fn test_metadata_from_resolution() {
        let layer = raster(
            Metadata::new()
                .with("wcs_extent", "0,0,100,50")
                .with("wcs_resolution", "0.5 0.5")
                .with("wcs_bandcount", "3"),
        );
        let cm = CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .unwrap();
        assert_eq!((cm.xsize, cm.ysize, cm.bandcount), (200, 100, 3));
    }

    #[test]
    fn test_missing_extent_is_metadata_error() {
        let layer = raster(Metadata::new().with("wcs_size", "10 10"));
        let err = CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .unwrap_err();
        assert!(matches!(err, WcsError::MetadataError { .. }));
    }

    #[test]
    fn test_native_crs_falls_back_to_service() {
        let layer = Layer::new("dem").with_metadata(
            Metadata::new()
                .with("wcs_extent", "0 0 1 1")
                .with("wcs_size", "1 1"),
        );
        let catalogue = ServiceCatalogue {
            projection: Projection::new("EPSG:4326"),
            ..Default::default()
        };
        let cm = CatalogueCoverageSource
            .coverage_metadata(&catalogue, &layer)
            .unwrap();
        assert_eq!(cm.native_crs_urn, "urn:ogc:def:crs:EPSG::4326");

        let err = CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .unwrap_err();
        assert!(matches!(err, WcsError::MetadataError { .. }));
    }

    #[test]
    fn test_native_crs_is_first_supported_crs() {
        let layer = Layer::new("tiles")
            .with_projection(Projection::new("EPSG:3857"))
            .with_metadata(
                Metadata::new()
                    .with("wcs_extent", "0 0 10 10")
                    .with("wcs_size", "1 1"),
            );
        let catalogue = ServiceCatalogue {
            projection: Projection::new("EPSG:4326"),
            ..Default::default()
        };
        let cm = CatalogueCoverageSource
            .coverage_metadata(&catalogue, &layer)
            .unwrap();

        assert_eq!(cm.native_crs_urn, "urn:ogc:def:crs:EPSG::3857");
        assert_eq!(
            resolve_crs(&catalogue, &layer).map(|l| l.first().to_string()),
            Some(cm.native_crs_urn)
        );
    }

    #[test]
    fn test_wgs84_extent_for_web_mercator() {
        let layer = Layer::new("tiles")
            .with_projection(Projection::new("EPSG:3857"))
            .with_metadata(
                Metadata::new()
                    .with("wcs_extent", "-20037508.34 0 0 20037508.34")
                    .with("wcs_size", "256 256"),
            );
        let cm = CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .unwrap();
        assert!((cm.wgs84_extent.min_x + 180.0).abs() < 1e-9);
        assert!(cm.wgs84_extent.min_y.abs() < 1e-9);
        assert!((cm.wgs84_extent.max_y - 85.0511).abs() < 1e-3);
    }

    #[test]
    fn test_projected_crs_needs_wgs84_extent() {
        let md = Metadata::new()
            .with("wcs_extent", "500000 4000000 510000 4010000")
            .with("wcs_size", "100 100");
        let layer = Layer::new("utm")
            .with_projection(Projection::new("EPSG:26915"))
            .with_metadata(md.clone());
        assert!(CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .is_err());

        let layer = layer.with_metadata(md.with("wcs_wgs84_extent", "-93 36 -92.9 36.1"));
        let cm = CatalogueCoverageSource
            .coverage_metadata(&ServiceCatalogue::default(), &layer)
            .unwrap();
        assert_eq!(cm.wgs84_extent, BoundingBox::new(-93.0, 36.0, -92.9, 36.1));
    }

    #[test]
    fn test_only_raster_layers_supported() {
        assert!(CatalogueCoverageSource.is_layer_supported(&Layer::new("dem")));
        assert!(!CatalogueCoverageSource
            .is_layer_supported(&Layer::new("roads").with_kind(LayerKind::Line)));
    }
}
