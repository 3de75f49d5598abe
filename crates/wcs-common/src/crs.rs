//! Projection definitions and CRS URN conversion.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Metadata;

/// URN of the pixel/line image CRS used for grid-space bounding boxes.
pub const IMAGE_CRS_URN: &str = "urn:ogc:def:crs:OGC::imageCRS";

/// A projection as configured on the service or on a layer.
///
/// Only the EPSG code is interpreted here; full projection math is the
/// business of the raster backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(Option<String>);

impl Projection {
    pub fn new(definition: impl Into<String>) -> Self {
        Self(Some(definition.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn definition(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Extract the EPSG code from the definition.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326" / "epsg:4326"
    /// - "init=epsg:4326"
    /// - "urn:ogc:def:crs:EPSG::4326"
    pub fn epsg_code(&self) -> Option<u32> {
        let def = self.0.as_deref()?.trim();
        let lower = def.to_ascii_lowercase();
        let code = lower
            .strip_prefix("init=epsg:")
            .or_else(|| lower.strip_prefix("epsg:"))
            .or_else(|| lower.strip_prefix("urn:ogc:def:crs:epsg::"))
            .or_else(|| lower.strip_prefix("urn:ogc:def:crs:epsg:6.5:"))?;
        code.parse().ok()
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_deref().unwrap_or("(none)"))
    }
}

/// Collect the SRS tokens advertised for a projection/metadata pair.
///
/// The `srs` metadata entry (whitespace separated, e.g. "EPSG:4326 EPSG:3857")
/// wins over the projection itself.
pub fn srs_tokens(projection: &Projection, metadata: &Metadata, namespaces: &str) -> Vec<String> {
    if let Some(value) = metadata.lookup(namespaces, "srs") {
        return value.split_whitespace().map(str::to_string).collect();
    }

    projection
        .epsg_code()
        .map(|code| vec![format!("EPSG:{}", code)])
        .unwrap_or_default()
}

/// Convert one SRS token into its OGC URN form.
///
/// - "EPSG:n" -> "urn:ogc:def:crs:EPSG::n"
/// - "CRS:n" -> "urn:ogc:def:crs:OGC::CRSn"
/// - tokens already in "urn:" form are kept as-is
pub fn to_urn(token: &str) -> Option<String> {
    let upper = token.to_ascii_uppercase();

    if upper.starts_with("URN:") {
        return Some(token.to_string());
    }
    if let Some(code) = upper.strip_prefix("EPSG:") {
        if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
            return Some(format!("urn:ogc:def:crs:EPSG::{}", code));
        }
        return None;
    }
    if let Some(code) = upper.strip_prefix("CRS:") {
        if !code.is_empty() {
            return Some(format!("urn:ogc:def:crs:OGC::CRS{}", code));
        }
    }
    None
}

/// Extract an EPSG code from a URN produced by [`to_urn`].
pub fn urn_epsg_code(urn: &str) -> Option<u32> {
    Projection::new(urn).epsg_code()
}

/// Check if a URN denotes WGS84 longitude/latitude.
pub fn is_wgs84_urn(urn: &str) -> bool {
    urn_epsg_code(urn) == Some(4326) || urn.eq_ignore_ascii_case("urn:ogc:def:crs:OGC::CRS84")
}

/// Check if a URN denotes spherical (web) mercator.
pub fn is_web_mercator_urn(urn: &str) -> bool {
    matches!(urn_epsg_code(urn), Some(3857) | Some(900913))
}
