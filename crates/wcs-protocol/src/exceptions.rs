//! OWS 1.1 exception reports.

use wcs_common::WcsError;

use crate::ows::{OWS_NAMESPACE_URI, XSI_NAMESPACE_URI};
use crate::xml::{Element, XmlDocument};

const OWS_SCHEMA_LOCATION: &str =
    "http://www.opengis.net/ows/1.1 http://schemas.opengis.net/ows/1.1.0/owsExceptionReport.xsd";

/// Build an `<ows:ExceptionReport>` with a single exception.
pub fn exception_report(
    version: &str,
    code: &str,
    locator: Option<&str>,
    text: &str,
) -> XmlDocument {
    let mut exception = Element::new("ows:Exception").attr("exceptionCode", code);
    if let Some(locator) = locator {
        exception.set_attr("locator", locator);
    }
    exception.push_text("ows:ExceptionText", text);

    XmlDocument::new(
        Element::new("ows:ExceptionReport")
            .attr("xmlns:ows", OWS_NAMESPACE_URI)
            .attr("xmlns:xsi", XSI_NAMESPACE_URI)
            .attr("version", version)
            .attr("language", "en-US")
            .attr("xsi:schemaLocation", OWS_SCHEMA_LOCATION)
            .child(exception),
    )
}

/// Exception report describing `err`.
pub fn exception_for(err: &WcsError, version: &str) -> XmlDocument {
    exception_report(version, err.exception_code(), err.locator(), &err.to_string())
}
