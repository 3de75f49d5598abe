//! Rendered coverage images and the encoder collaborator.

use thiserror::Error;

use crate::OutputFormat;

/// An already rendered coverage: 8-bit samples, band interleaved by pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    pub bands: u32,
    pub pixels: Vec<u8>,
}

impl RenderedImage {
    pub fn new(width: u32, height: u32, bands: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bands,
            pixels,
        }
    }

    /// Number of samples the pixel buffer must hold.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bands as usize
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Output format '{0}' cannot be encoded")]
    UnsupportedFormat(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Encoding failed: {0}")]
    Failed(String),
}

/// Turns a rendered image into the bytes of an output format.
pub trait ImageEncoder {
    fn encode(&self, image: &RenderedImage, format: &OutputFormat) -> Result<Vec<u8>, EncodeError>;
}
