//! Coverage image encoding.
//!
//! Turns already rendered coverages into output format bytes:
//! - PNG (grayscale, grayscale + alpha, RGB, RGBA)
//! - Raw band-interleaved samples for RAWDATA formats

pub mod encoder;
pub mod png;

pub use encoder::CoverageEncoder;
