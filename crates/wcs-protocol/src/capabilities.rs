//! WCS 1.1 GetCapabilities document.

use tracing::{debug, error};

use wcs_common::{CoverageBackend, ServiceCatalogue, WcsError, WcsResult};

use crate::formats::resolve_formats;
use crate::ows::{operation, parameter, service_identification, service_provider, wcs_root, NAMESPACES};
use crate::request::{RequestContext, WcsParams};
use crate::summary::build_summary;
use crate::xml::{Element, XmlDocument};

pub const INTERPOLATION_TYPES: &str = "NEAREST_NEIGHBOUR,BILINEAR";
pub const GET_COVERAGE_GRID_BASE_CRS: &str = "urn:ogc:def:crs:epsg::4326";

/// Assemble the `<Capabilities>` document.
///
/// Fails with `NoApplicableCode` when no service URL can be determined, and
/// propagates the first coverage summary failure. Nothing is returned for
/// serialization unless the whole document was built.
pub fn build_capabilities<B>(
    catalogue: &ServiceCatalogue,
    params: WcsParams,
    ctx: &RequestContext,
    backend: &B,
) -> WcsResult<XmlDocument>
where
    B: CoverageBackend + ?Sized,
{
    let version = params.version().to_string();

    let identifiers = catalogue
        .layers
        .iter()
        .filter(|layer| backend.is_layer_supported(layer))
        .map(|layer| layer.name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let url = online_resource(catalogue, ctx)?;

    let mut root = wcs_root("Capabilities", &version);
    root.push(service_identification(catalogue, "OGC WCS", &version));
    root.push(service_provider(catalogue));

    let mut operations = Element::new("ows:OperationsMetadata");
    operations.push(
        operation("GetCapabilities", &url)
            .child(parameter("service", "WCS"))
            .child(parameter("version", &version)),
    );
    operations.push(
        operation("DescribeCoverage", &url)
            .child(parameter("service", "WCS"))
            .child(parameter("version", &version))
            .child(parameter("identifiers", &identifiers)),
    );
    operations.push(
        operation("GetCoverage", &url)
            .child(parameter("service", "WCS"))
            .child(parameter("version", &version))
            .child(parameter("Identifier", &identifiers))
            .child(parameter("InterpolationType", INTERPOLATION_TYPES))
            .child(parameter("format", &resolve_formats(catalogue, None).to_string()))
            .child(parameter("store", "false"))
            .child(parameter("GridBaseCRS", GET_COVERAGE_GRID_BASE_CRS)),
    );
    root.push(operations);

    let mut contents = Element::new("Contents");
    for layer in catalogue
        .layers
        .iter()
        .filter(|layer| backend.is_layer_supported(layer))
    {
        let summary = build_summary(catalogue, layer, backend).map_err(|e| {
            error!(layer = %layer.name, error = %e, "Coverage summary failed, aborting capabilities");
            e
        })?;
        contents.push(summary);
    }
    debug!(coverages = contents.children().len(), "Capabilities contents built");
    root.push(contents);

    Ok(XmlDocument::new(root))
}

/// Service URL advertised for every operation, terminated so parameters can
/// be appended directly.
pub fn online_resource(catalogue: &ServiceCatalogue, ctx: &RequestContext) -> WcsResult<String> {
    let url = catalogue
        .metadata
        .lookup(NAMESPACES, "onlineresource")
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .or_else(|| ctx.service_url())
        .ok_or_else(|| {
            WcsError::NoApplicableCode("Unable to determine the service online resource".into())
        })?;

    Ok(terminate_url(url))
}

fn terminate_url(mut url: String) -> String {
    if !url.contains('?') {
        url.push('?');
    } else if !url.ends_with('?') && !url.ends_with('&') {
        url.push('&');
    }
    url
}
