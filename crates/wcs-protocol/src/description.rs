//! CoverageDescription elements for DescribeCoverage.

use tracing::debug;

use wcs_common::{CoverageBackend, CoverageMetadata, Layer, ServiceCatalogue, WcsResult};

use crate::ows::{coverage_bounding_boxes, format_g, NAMESPACES};
use crate::summary::{push_identification, push_supported_crs, push_supported_formats};
use crate::xml::Element;

pub const GRID_TYPE_2D_SIMPLE: &str = "urn:ogc:def:method:WCS:1.1:2dSimpleGrid";
pub const GRID_CS_2D_SQUARE: &str = "urn:ogc:def:cs:OGC:0.0:Grid2dSquareCS";

/// Build the `<CoverageDescription>` of one layer.
///
/// Returns `Ok(None)` when the backend does not expose the layer as a
/// coverage. Metadata failures propagate.
pub fn build_description<B>(
    catalogue: &ServiceCatalogue,
    layer: &Layer,
    backend: &B,
) -> WcsResult<Option<Element>>
where
    B: CoverageBackend + ?Sized,
{
    if !backend.is_layer_supported(layer) {
        debug!(layer = %layer.name, "Layer is not a coverage, skipped");
        return Ok(None);
    }

    let cm = backend.coverage_metadata(catalogue, layer)?;

    let mut description = Element::new("CoverageDescription");

    push_identification(&mut description, layer);
    description.push(Element::new("Domain").child(spatial_domain(&cm)));
    description.push(Element::new("Range").child(range_field(layer)));
    push_supported_crs(&mut description, catalogue, layer);
    push_supported_formats(&mut description, catalogue, layer);

    Ok(Some(description))
}

fn spatial_domain(cm: &CoverageMetadata) -> Element {
    let mut domain = Element::new("SpatialDomain");
    for bbox in coverage_bounding_boxes(cm) {
        domain.push(bbox);
    }
    domain.push(grid_crs(cm));
    domain
}

fn grid_crs(cm: &CoverageMetadata) -> Element {
    let (origin_x, origin_y) = cm.geotransform.grid_origin();
    let (offset_x, offset_y) = cm.geotransform.grid_offsets();

    Element::new("GridCRS")
        .child(Element::with_text("GridBaseCRS", cm.native_crs_urn.as_str()))
        .child(Element::with_text("GridType", GRID_TYPE_2D_SIMPLE))
        .child(Element::with_text(
            "GridOrigin",
            format!("{} {}", format_g(origin_x), format_g(origin_y)),
        ))
        .child(Element::with_text(
            "GridOffsets",
            format!("{} {}", format_g(offset_x), format_g(offset_y)),
        ))
        .child(Element::with_text("GridCS", GRID_CS_2D_SQUARE))
}

// Only a single band key is advertised for now.
fn range_field(layer: &Layer) -> Element {
    let md = &layer.metadata;
    let mut field = Element::new("Field");

    if let Some(label) = md.lookup(NAMESPACES, "rangeset_label") {
        field.push_text("ows:Title", label);
    }
    field.push_text(
        "Identifier",
        md.lookup_or(NAMESPACES, "rangeset_name", "bands"),
    );
    field.push(
        Element::new("InterpolationMethods")
            .child(Element::with_text("DefaultMethod", "nearest neighbour"))
            .child(Element::with_text("OtherMethod", "bilinear")),
    );
    field.push(
        Element::new("Axis")
            .attr("identifier", "Band")
            .child(Element::new("AvailableKeys").child(Element::with_text("Key", "1"))),
    );

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::CatalogueCoverageSource;
    use wcs_common::{LayerKind, Metadata, Projection};

    fn grid_layer() -> Layer {
        Layer::new("grid")
            .with_projection(Projection::new("EPSG:4326"))
            .with_metadata(
                Metadata::new()
                    .with("wcs_extent", "0 -10 10 0")
                    .with("wcs_size", "10 10"),
            )
    }

    fn describe(layer: &Layer) -> Element {
        build_description(&ServiceCatalogue::default(), layer, &CatalogueCoverageSource)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_grid_origin_and_offsets() {
        let description = describe(&grid_layer());
        let grid = description
            .find_path(&["Domain", "SpatialDomain", "GridCRS"])
            .unwrap();

        assert_eq!(grid.find("GridOrigin").and_then(|e| e.text()), Some("0.5 -0.5"));
        assert_eq!(grid.find("GridOffsets").and_then(|e| e.text()), Some("1 -1"));
        assert_eq!(
            grid.find("GridBaseCRS").and_then(|e| e.text()),
            Some("urn:ogc:def:crs:EPSG::4326")
        );
        assert_eq!(grid.find("GridType").and_then(|e| e.text()), Some(GRID_TYPE_2D_SIMPLE));
        assert_eq!(grid.find("GridCS").and_then(|e| e.text()), Some(GRID_CS_2D_SQUARE));
    }

    #[test]
    fn test_range_defaults() {
        let description = describe(&grid_layer());
        let field = description.find_path(&["Range", "Field"]).unwrap();

        assert!(field.find("ows:Title").is_none());
        assert_eq!(field.find("Identifier").and_then(|e| e.text()), Some("bands"));
        assert_eq!(
            field
                .find_path(&["InterpolationMethods", "DefaultMethod"])
                .and_then(|e| e.text()),
            Some("nearest neighbour")
        );
        let axis = field.find("Axis").unwrap();
        assert_eq!(axis.attribute("identifier"), Some("Band"));
        assert_eq!(
            axis.find_path(&["AvailableKeys", "Key"]).and_then(|e| e.text()),
            Some("1")
        );
    }

    #[test]
    fn test_range_overrides() {
        let mut layer = grid_layer();
        layer.metadata.insert("wcs_rangeset_name", "elevation");
        layer.metadata.insert("wcs_rangeset_label", "Elevation (m)");

        let description = describe(&layer);
        let field = description.find_path(&["Range", "Field"]).unwrap();
        assert_eq!(field.find("ows:Title").and_then(|e| e.text()), Some("Elevation (m)"));
        assert_eq!(field.find("Identifier").and_then(|e| e.text()), Some("elevation"));
    }

    #[test]
    fn test_crs_precedes_formats() {
        let description = describe(&grid_layer());
        let names: Vec<_> = description.children().iter().map(Element::name).collect();
        assert_eq!(
            names,
            vec!["ows:Title", "Identifier", "Domain", "Range", "SupportedCRS"]
        );
    }

    #[test]
    fn test_ineligible_layer_skipped() {
        let layer = grid_layer().with_kind(LayerKind::Polygon);
        let result =
            build_description(&ServiceCatalogue::default(), &layer, &CatalogueCoverageSource)
                .unwrap();
        assert!(result.is_none());
    }
}
