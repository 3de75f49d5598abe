//! CoverageSummary elements for the Capabilities Contents section.

use tracing::debug;

use wcs_common::{CoverageMetadataSource, Layer, ServiceCatalogue, WcsResult};

use crate::crs::resolve_crs;
use crate::formats::resolve_formats;
use crate::ows::{coverage_bounding_boxes, NAMESPACES};
use crate::xml::{generate_list, Element};

/// Build the `<CoverageSummary>` of one layer.
///
/// Coverage metadata is computed first; a `MetadataError` propagates and no
/// element is produced.
pub fn build_summary<S>(
    catalogue: &ServiceCatalogue,
    layer: &Layer,
    source: &S,
) -> WcsResult<Element>
where
    S: CoverageMetadataSource + ?Sized,
{
    let cm = source.coverage_metadata(catalogue, layer)?;
    debug!(layer = %layer.name, xsize = cm.xsize, ysize = cm.ysize, "Building coverage summary");

    let mut summary = Element::new("CoverageSummary");

    push_identification(&mut summary, layer);
    for bbox in coverage_bounding_boxes(&cm) {
        summary.push(bbox);
    }
    push_supported_formats(&mut summary, catalogue, layer);
    push_supported_crs(&mut summary, catalogue, layer);

    Ok(summary)
}

/// Title, Identifier and the optional Keywords block.
pub(crate) fn push_identification(parent: &mut Element, layer: &Layer) {
    let md = &layer.metadata;

    parent.push_text(
        "ows:Title",
        md.lookup(NAMESPACES, "description")
            .unwrap_or(layer.name.as_str()),
    );
    parent.push_text("Identifier", layer.name.as_str());

    if let Some(keywords) = md.lookup(NAMESPACES, "keywordlist") {
        generate_list(
            parent.push(Element::new("ows:Keywords")),
            "ows:Keyword",
            keywords,
            ',',
        );
    }
}

/// One `<SupportedFormat>` per layer-scoped MIME type, nothing when empty.
pub(crate) fn push_supported_formats(
    parent: &mut Element,
    catalogue: &ServiceCatalogue,
    layer: &Layer,
) {
    for mime_type in resolve_formats(catalogue, Some(layer)).iter() {
        parent.push_text("SupportedFormat", mime_type);
    }
}

/// One `<SupportedCRS>` per resolved URN, nothing when unresolved.
pub(crate) fn push_supported_crs(parent: &mut Element, catalogue: &ServiceCatalogue, layer: &Layer) {
    if let Some(crs) = resolve_crs(catalogue, layer) {
        for urn in crs.iter() {
            parent.push_text("SupportedCRS", urn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::CatalogueCoverageSource;
    use wcs_common::{Metadata, OutputFormat, Projection, RendererKind, WcsError};

    fn catalogue() -> ServiceCatalogue {
        ServiceCatalogue {
            output_formats: vec![OutputFormat::new(
                "GTiff",
                "image/tiff",
                "tif",
                RendererKind::Gd,
            )],
            ..Default::default()
        }
    }

    fn dem() -> Layer {
        Layer::new("dem")
            .with_projection(Projection::new("EPSG:4326"))
            .with_metadata(
                Metadata::new()
                    .with("wcs_extent", "-180 -90 180 90")
                    .with("wcs_size", "360 180")
                    .with("wcs_description", "Elevation")
                    .with("ows_keywordlist", "height,terrain"),
            )
    }

    fn names(el: &Element) -> Vec<&str> {
        el.children().iter().map(Element::name).collect()
    }

    #[test]
    fn test_summary_element_order() {
        let summary = build_summary(&catalogue(), &dem(), &CatalogueCoverageSource).unwrap();
        assert_eq!(
            names(&summary),
            vec![
                "ows:Title",
                "Identifier",
                "ows:Keywords",
                "ows:BoundingBox",
                "ows:BoundingBox",
                "ows:WGS84BoundingBox",
                "SupportedFormat",
                "SupportedCRS",
            ]
        );
        assert_eq!(summary.find("ows:Title").and_then(|t| t.text()), Some("Elevation"));
        assert_eq!(summary.find("Identifier").and_then(|t| t.text()), Some("dem"));
        assert_eq!(
            summary.find("ows:Keywords").map(|k| k.children().len()),
            Some(2)
        );
    }

    #[test]
    fn test_image_crs_bbox() {
        let summary = build_summary(&catalogue(), &dem(), &CatalogueCoverageSource).unwrap();
        let image = summary.find("ows:BoundingBox").unwrap();
        assert_eq!(image.attribute("crs"), Some("urn:ogc:def:crs:OGC::imageCRS"));
        assert_eq!(image.find("ows:UpperCorner").and_then(|c| c.text()), Some("359 179"));
    }

    #[test]
    fn test_title_defaults_to_name_and_sections_omitted() {
        let layer = Layer::new("bare").with_metadata(
            Metadata::new()
                .with("wcs_extent", "0 0 1 1")
                .with("wcs_size", "1 1")
                .with("wcs_srs", "EPSG:4326"),
        );
        let summary =
            build_summary(&ServiceCatalogue::default(), &layer, &CatalogueCoverageSource).unwrap();
        assert_eq!(summary.find("ows:Title").and_then(|t| t.text()), Some("bare"));
        assert!(summary.find("ows:Keywords").is_none());
        assert!(summary.find("SupportedFormat").is_none());
    }

    #[test]
    fn test_metadata_error_propagates() {
        let err = build_summary(&catalogue(), &Layer::new("empty"), &CatalogueCoverageSource)
            .unwrap_err();
        assert!(matches!(err, WcsError::MetadataError { .. }));
    }
}
