//! Tests for output-format dispatch.

use renderer::png::PNG_SIGNATURE;
use renderer::CoverageEncoder;
use wcs_common::{EncodeError, ImageEncoder, OutputFormat, RenderedImage, RendererKind};

fn png_format() -> OutputFormat {
    OutputFormat::new("PNG", "image/png", "png", RendererKind::Agg)
}

#[test]
fn test_png_by_band_count() {
    for bands in 1..=4u32 {
        let image = RenderedImage::new(3, 2, bands, vec![7; 6 * bands as usize]);
        let bytes = CoverageEncoder.encode(&image, &png_format()).unwrap();
        assert_eq!(&bytes[0..8], &PNG_SIGNATURE);
    }
}

#[test]
fn test_png_mime_case_insensitive() {
    let format = OutputFormat::new("png8", "IMAGE/PNG", "png", RendererKind::Gd);
    let image = RenderedImage::new(1, 1, 1, vec![0]);
    assert!(CoverageEncoder.encode(&image, &format).is_ok());
}

#[test]
fn test_too_many_bands_for_png() {
    let image = RenderedImage::new(1, 1, 5, vec![0; 5]);
    let err = CoverageEncoder.encode(&image, &png_format()).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidImage(_)));
}

#[test]
fn test_raw_passthrough() {
    let format = OutputFormat::new("RAW", "application/octet-stream", "raw", RendererKind::RawData);
    let image = RenderedImage::new(2, 2, 2, (0..8).collect());
    let bytes = CoverageEncoder::new().encode(&image, &format).unwrap();
    assert_eq!(bytes, (0..8).collect::<Vec<u8>>());
}

#[test]
fn test_unsupported_format() {
    let format = OutputFormat::new("GTiff", "image/tiff", "tif", RendererKind::Gd);
    let image = RenderedImage::new(1, 1, 1, vec![0]);
    let err = CoverageEncoder.encode(&image, &format).unwrap_err();
    assert!(matches!(err, EncodeError::UnsupportedFormat(ref name) if name == "GTiff"));
}

#[test]
fn test_buffer_length_mismatch() {
    let image = RenderedImage::new(2, 2, 1, vec![0; 3]);
    let err = CoverageEncoder.encode(&image, &png_format()).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidImage(_)));
}
