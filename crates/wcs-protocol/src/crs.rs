//! Supported CRS list derivation.

use std::fmt;
use tracing::debug;

use wcs_common::crs::{srs_tokens, to_urn};
use wcs_common::{Layer, Metadata, Projection, ServiceCatalogue};

use crate::fallback::FallbackChain;
use crate::ows::NAMESPACES;

/// Non-empty list of CRS URNs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrsList(Vec<String>);

impl CrsList {
    /// The first (native) CRS.
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Space-delimited form.
impl fmt::Display for CrsList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Resolve the CRS URNs supported by `layer`.
///
/// The layer's own projection and metadata take precedence; the service
/// level is consulted only when the layer yields nothing. `None` means the
/// caller omits its SupportedCRS section.
pub fn resolve_crs(catalogue: &ServiceCatalogue, layer: &Layer) -> Option<CrsList> {
    FallbackChain::new("SupportedCRS")
        .then("layer", || projection_urns(&layer.projection, &layer.metadata))
        .then("map", || {
            projection_urns(&catalogue.projection, &catalogue.metadata)
        })
        .resolve()
}

/// URNs for one projection/metadata level, `None` if nothing converts.
fn projection_urns(projection: &Projection, metadata: &Metadata) -> Option<CrsList> {
    let urns: Vec<String> = srs_tokens(projection, metadata, NAMESPACES)
        .iter()
        .filter_map(|token| {
            let urn = to_urn(token);
            if urn.is_none() {
                debug!(srs = %token, "SRS has no URN form, ignored");
            }
            urn
        })
        .collect();

    if urns.is_empty() {
        None
    } else {
        Some(CrsList(urns))
    }
}
