//! Raster loading for GetCoverage.
//!
//! Coverages are stored as raw 8-bit samples, band interleaved by pixel,
//! row-major from the top-left corner, with the grid size and band count
//! given by the layer's coverage metadata.

use std::path::Path;

use tracing::debug;

use wcs_common::{CoverageMetadata, RenderedImage, WcsError, WcsResult};

/// Read a layer's raw raster file as a rendered image.
pub async fn load_raster(path: &Path, cm: &CoverageMetadata) -> WcsResult<RenderedImage> {
    let pixels = tokio::fs::read(path).await.map_err(|e| {
        WcsError::NoApplicableCode(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let image = RenderedImage::new(cm.xsize, cm.ysize, cm.bandcount, pixels);
    if image.pixels.len() != image.expected_len() {
        return Err(WcsError::NoApplicableCode(format!(
            "{} holds {} bytes, expected {} for {}x{}x{}",
            path.display(),
            image.pixels.len(),
            image.expected_len(),
            cm.xsize,
            cm.ysize,
            cm.bandcount
        )));
    }

    debug!(path = %path.display(), bytes = image.pixels.len(), "Loaded raster");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wcs_common::{BoundingBox, GeoTransform};

    fn metadata(xsize: u32, ysize: u32, bandcount: u32) -> CoverageMetadata {
        let extent = BoundingBox::new(0.0, 0.0, xsize as f64, ysize as f64);
        CoverageMetadata {
            xsize,
            ysize,
            bandcount,
            extent,
            wgs84_extent: extent,
            geotransform: GeoTransform::from_extent(&extent, xsize, ysize),
            native_crs_urn: "urn:ogc:def:crs:EPSG::4326".into(),
        }
    }

    #[tokio::test]
    async fn test_load_raster() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3, 4, 5, 6]).unwrap();

        let image = load_raster(file.path(), &metadata(3, 2, 1)).await.unwrap();
        assert_eq!((image.width, image.height, image.bands), (3, 2, 1));
        assert_eq!(image.pixels, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_size_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3]).unwrap();

        let err = load_raster(file.path(), &metadata(2, 2, 1)).await.unwrap_err();
        assert!(matches!(err, WcsError::NoApplicableCode(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_raster(Path::new("/nonexistent/dem.raw"), &metadata(1, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, WcsError::NoApplicableCode(_)));
    }
}
