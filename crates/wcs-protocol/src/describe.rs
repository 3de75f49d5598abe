//! WCS 1.1 DescribeCoverage document.

use tracing::{debug, warn};

use wcs_common::{CoverageBackend, Layer, ServiceCatalogue, WcsError, WcsResult};

use crate::description::build_description;
use crate::ows::wcs_root;
use crate::request::WcsParams;
use crate::xml::XmlDocument;

/// Expand the requested identifiers. A lone token is a comma list; empty
/// pieces are dropped and nothing is trimmed.
pub fn requested_identifiers(coverages: &[String]) -> Vec<String> {
    match coverages {
        [single] => single
            .split(',')
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
        many => many.to_vec(),
    }
}

/// Assemble the `<CoverageDescriptions>` document.
///
/// Every requested identifier is checked against the catalogue before any
/// XML is built; the first unknown one fails with `CoverageNotDefined`. When
/// no identifier parameter was given every layer is described and ineligible
/// ones are skipped. A parameter that splits into nothing describes nothing.
pub fn build_describe_coverage<B>(
    catalogue: &ServiceCatalogue,
    params: WcsParams,
    backend: &B,
) -> WcsResult<XmlDocument>
where
    B: CoverageBackend + ?Sized,
{
    let layers: Vec<&Layer> = if params.coverages.is_empty() {
        catalogue.layers.iter().collect()
    } else {
        requested_identifiers(&params.coverages)
            .iter()
            .map(|id| {
                catalogue.layer_by_name(id).ok_or_else(|| {
                    warn!(coverage = %id, "Requested coverage not found");
                    WcsError::CoverageNotDefined(id.clone())
                })
            })
            .collect::<WcsResult<_>>()?
    };

    let mut root = wcs_root("CoverageDescriptions", params.version());
    for layer in layers {
        if let Some(description) = build_description(catalogue, layer, backend)? {
            root.push(description);
        }
    }
    debug!(coverages = root.children().len(), "Coverage descriptions built");

    Ok(XmlDocument::new(root))
}
