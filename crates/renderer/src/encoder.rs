//! Output-format dispatch for rendered coverages.

use tracing::debug;

use wcs_common::{EncodeError, ImageEncoder, OutputFormat, RenderedImage, RendererKind};

use crate::png::{create_png, ColorType};

pub const PNG_MIME_TYPE: &str = "image/png";

/// Encodes coverages as PNG, or passes raw samples through for RAWDATA
/// formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoverageEncoder;

impl CoverageEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageEncoder for CoverageEncoder {
    fn encode(&self, image: &RenderedImage, format: &OutputFormat) -> Result<Vec<u8>, EncodeError> {
        if image.width == 0 || image.height == 0 {
            return Err(EncodeError::InvalidImage(format!(
                "empty image {}x{}",
                image.width, image.height
            )));
        }
        if image.pixels.len() != image.expected_len() {
            return Err(EncodeError::InvalidImage(format!(
                "expected {} samples for {}x{}x{}, got {}",
                image.expected_len(),
                image.width,
                image.height,
                image.bands,
                image.pixels.len()
            )));
        }

        if format.renderer == RendererKind::RawData {
            debug!(format = %format.name, bytes = image.pixels.len(), "Raw coverage passthrough");
            return Ok(image.pixels.clone());
        }

        match format.mime_type() {
            Some(mime) if mime.eq_ignore_ascii_case(PNG_MIME_TYPE) => {
                let color = ColorType::from_bands(image.bands).ok_or_else(|| {
                    EncodeError::InvalidImage(format!(
                        "PNG holds 1 to 4 bands, image has {}",
                        image.bands
                    ))
                })?;
                let png = create_png(
                    &image.pixels,
                    image.width as usize,
                    image.height as usize,
                    color,
                )
                .map_err(EncodeError::Failed)?;
                debug!(format = %format.name, bytes = png.len(), "PNG coverage encoded");
                Ok(png)
            }
            _ => Err(EncodeError::UnsupportedFormat(format.name.clone())),
        }
    }
}
