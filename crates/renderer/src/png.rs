//! PNG encoding for 8-bit coverage samples.
//!
//! One to four interleaved bands map onto the PNG color types:
//! - 1 band: grayscale (color type 0)
//! - 2 bands: grayscale + alpha (color type 4)
//! - 3 bands: RGB (color type 2)
//! - 4 bands: RGBA (color type 6)

use std::io::Write;

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// PNG color type for a given number of 8-bit samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl ColorType {
    /// Color type for `bands` samples per pixel, `None` beyond four.
    pub fn from_bands(bands: u32) -> Option<Self> {
        match bands {
            1 => Some(ColorType::Gray),
            2 => Some(ColorType::GrayAlpha),
            3 => Some(ColorType::Rgb),
            4 => Some(ColorType::Rgba),
            _ => None,
        }
    }

    /// IHDR color type code.
    pub fn code(&self) -> u8 {
        match self {
            ColorType::Gray => 0,
            ColorType::GrayAlpha => 4,
            ColorType::Rgb => 2,
            ColorType::Rgba => 6,
        }
    }

    pub fn samples(&self) -> usize {
        match self {
            ColorType::Gray => 1,
            ColorType::GrayAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }
}

/// Create a PNG image from interleaved 8-bit samples.
///
/// # Arguments
/// - `pixels`: `width * height * color.samples()` bytes, row-major
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
/// - `color`: Layout of each pixel's samples
pub fn create_png(
    pixels: &[u8],
    width: usize,
    height: usize,
    color: ColorType,
) -> Result<Vec<u8>, String> {
    let row_len = width * color.samples();
    if pixels.len() != row_len * height {
        return Err(format!(
            "expected {} bytes for {}x{} {:?}, got {}",
            row_len * height,
            width,
            height,
            color,
            pixels.len()
        ));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(color.code());
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    let idat_data = deflate_idat(pixels, row_len, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate scanlines for the IDAT chunk, each prefixed with filter type 0.
fn deflate_idat(pixels: &[u8], row_len: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_len));
    if row_len > 0 {
        for row in pixels.chunks_exact(row_len) {
            uncompressed.push(0);
            uncompressed.extend_from_slice(row);
        }
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}
