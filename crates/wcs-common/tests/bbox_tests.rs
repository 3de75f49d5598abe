//! Tests for BoundingBox parsing and dimensions.

use wcs_common::bbox::{BboxParseError, BoundingBox};

// ============================================================================
// comma-separated extents
// ============================================================================

#[test]
fn test_parse_extent_integer() {
    let bbox = BoundingBox::from_extent_string("0,0,100,100").unwrap();
    assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_parse_extent_floating() {
    let bbox = BoundingBox::from_extent_string("-125.5,24.75,-66.25,50.125").unwrap();
    assert!((bbox.min_x - (-125.5)).abs() < 0.001);
    assert!((bbox.min_y - 24.75).abs() < 0.001);
    assert!((bbox.max_x - (-66.25)).abs() < 0.001);
    assert!((bbox.max_y - 50.125).abs() < 0.001);
}

#[test]
fn test_parse_extent_scientific_notation() {
    let bbox = BoundingBox::from_extent_string("1e-6,2e-6,1e6,2e6").unwrap();
    assert!((bbox.min_x - 1e-6).abs() < 1e-10);
    assert!((bbox.max_x - 1e6).abs() < 0.001);
}

#[test]
fn test_parse_extent_invalid_format_too_few() {
    let result = BoundingBox::from_extent_string("0,0,100");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_extent_invalid_number() {
    let result = BoundingBox::from_extent_string("abc,0,100,100");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

#[test]
fn test_parse_extent_empty_string() {
    let result = BoundingBox::from_extent_string("");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

// ============================================================================
// mixed separators
// ============================================================================

#[test]
fn test_parse_extent_mixed_separators() {
    let bbox = BoundingBox::from_extent_string("-180, -90 180 90").unwrap();
    assert_eq!(bbox, BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
}

#[test]
fn test_parse_extent_too_many_values() {
    let result = BoundingBox::from_extent_string("0 0 1 1 2");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

// ============================================================================
// Dimension tests
// ============================================================================

#[test]
fn test_bbox_width_crossing_zero() {
    let bbox = BoundingBox::new(-10.0, -5.0, 10.0, 5.0);
    assert_eq!(bbox.width(), 20.0);
    assert_eq!(bbox.height(), 10.0);
}

#[test]
fn test_bbox_zero_dimensions() {
    let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}
