//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box.
///
/// For geographic CRS (EPSG:4326), coordinates are in degrees.
/// For projected CRS (EPSG:3857, etc.), coordinates are in CRS units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse an extent written either comma- or whitespace-separated,
    /// as found in `wcs_extent` style metadata: "minx miny maxx maxy".
    pub fn from_extent_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        Self::from_parts(s, &parts)
    }

    fn from_parts(s: &str, parts: &[&str]) -> Result<Self, BboxParseError> {
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let num = |p: &str| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        Ok(Self {
            min_x: num(parts[0])?,
            min_y: num(parts[1])?,
            max_x: num(parts[2])?,
            max_y: num(parts[3])?,
        })
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid extent: {0}. Expected 'minx miny maxx maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in extent: {0}")]
    InvalidNumber(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extent_commas() {
        let bbox = BoundingBox::from_extent_string("-125.0,24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_parse_extent_whitespace() {
        let bbox = BoundingBox::from_extent_string("0 0  100 50").unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);
    }
}
