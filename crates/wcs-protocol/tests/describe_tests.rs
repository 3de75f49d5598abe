//! Integration tests for the DescribeCoverage document.

use wcs_common::{Layer, LayerKind, Metadata, Projection, ServiceCatalogue, WcsError};
use wcs_protocol::{build_describe_coverage, CatalogueCoverageSource, WcsParams};

fn layer(name: &str) -> Layer {
    Layer::new(name)
        .with_projection(Projection::new("EPSG:4326"))
        .with_metadata(
            Metadata::new()
                .with("wcs_extent", "0 -10 10 0")
                .with("wcs_size", "10 10"),
        )
}

fn catalogue() -> ServiceCatalogue {
    ServiceCatalogue {
        layers: vec![
            layer("A"),
            layer("B"),
            Layer::new("roads").with_kind(LayerKind::Line),
        ],
        ..Default::default()
    }
}

fn params(coverages: &[&str]) -> WcsParams {
    WcsParams {
        service: Some("WCS".into()),
        version: Some("1.1.0".into()),
        request: Some("DescribeCoverage".into()),
        coverages: coverages.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    }
}

fn described(coverages: &[&str]) -> Vec<String> {
    let doc = build_describe_coverage(&catalogue(), params(coverages), &CatalogueCoverageSource)
        .unwrap();
    assert_eq!(doc.root().name(), "CoverageDescriptions");
    doc.root()
        .find_all("CoverageDescription")
        .filter_map(|d| d.find("Identifier").and_then(|i| i.text()))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_comma_token_equals_separate_tokens() {
    let cat = catalogue();
    let joined =
        build_describe_coverage(&cat, params(&["A,B"]), &CatalogueCoverageSource).unwrap();
    let separate =
        build_describe_coverage(&cat, params(&["A", "B"]), &CatalogueCoverageSource).unwrap();

    assert_eq!(joined, separate);
    assert_eq!(described(&["A,B"]), vec!["A", "B"]);
}

#[test]
fn test_unknown_identifier_fails() {
    let err = build_describe_coverage(&catalogue(), params(&["A", "C"]), &CatalogueCoverageSource)
        .unwrap_err();
    assert!(matches!(err, WcsError::CoverageNotDefined(ref id) if id == "C"));
    assert_eq!(err.locator(), Some("C"));
}

#[test]
fn test_identifiers_are_case_sensitive() {
    let err = build_describe_coverage(&catalogue(), params(&["a"]), &CatalogueCoverageSource)
        .unwrap_err();
    assert!(matches!(err, WcsError::CoverageNotDefined(_)));
}

#[test]
fn test_unknown_identifier_checked_before_metadata() {
    let mut cat = catalogue();
    cat.layers[0].metadata = Metadata::new();

    let err = build_describe_coverage(&cat, params(&["A,missing"]), &CatalogueCoverageSource)
        .unwrap_err();
    assert!(matches!(err, WcsError::CoverageNotDefined(_)));
}

#[test]
fn test_empty_request_describes_every_eligible_layer() {
    assert_eq!(described(&[]), vec!["A", "B"]);
}

#[test]
fn test_identifiers_splitting_to_nothing_describe_nothing() {
    assert!(described(&[","]).is_empty());
    assert!(described(&[""]).is_empty());
}

#[test]
fn test_request_order_and_duplicates_kept() {
    assert_eq!(described(&["B", "A", "B"]), vec!["B", "A", "B"]);
}

#[test]
fn test_explicit_ineligible_layer_skipped() {
    assert_eq!(described(&["roads,A"]), vec!["A"]);
}

#[test]
fn test_description_failure_aborts() {
    let mut cat = catalogue();
    cat.layers[1].metadata = Metadata::new();

    let err = build_describe_coverage(&cat, params(&[]), &CatalogueCoverageSource).unwrap_err();
    assert!(matches!(err, WcsError::MetadataError { .. }));
}

#[test]
fn test_grid_origin_in_document() {
    let doc =
        build_describe_coverage(&catalogue(), params(&["A"]), &CatalogueCoverageSource).unwrap();
    let xml = String::from_utf8(doc.to_latin1_bytes().unwrap()).unwrap();

    assert!(xml.contains("<GridOrigin>0.5 -0.5</GridOrigin>"));
    assert!(xml.contains("<GridOffsets>1 -1</GridOffsets>"));
    assert!(xml.contains(r#"<Axis identifier="Band">"#));
}
