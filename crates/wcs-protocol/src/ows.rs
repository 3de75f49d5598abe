//! OWS Common 1.1 building blocks shared by the WCS documents.

use wcs_common::crs::IMAGE_CRS_URN;
use wcs_common::{CoverageMetadata, Metadata, ServiceCatalogue};

use crate::xml::{generate_list, Element};

pub const WCS_NAMESPACE_URI: &str = "http://www.opengis.net/wcs/1.1";
pub const OWS_NAMESPACE_URI: &str = "http://www.opengis.net/ows/1.1";
pub const XLINK_NAMESPACE_URI: &str = "http://www.w3.org/1999/xlink";
pub const XSI_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const OGC_NAMESPACE_URI: &str = "http://www.opengis.net/ogc";

/// Metadata namespaces consulted for service-level values.
pub const NAMESPACES: &str = "COM";

/// Root element of a WCS 1.1 document with the standard namespaces and
/// the `version` attribute echoing the request.
pub fn wcs_root(name: &str, version: &str) -> Element {
    Element::new(name)
        .attr("xmlns", WCS_NAMESPACE_URI)
        .attr("xmlns:ows", OWS_NAMESPACE_URI)
        .attr("xmlns:xlink", XLINK_NAMESPACE_URI)
        .attr("xmlns:xsi", XSI_NAMESPACE_URI)
        .attr("xmlns:ogc", OGC_NAMESPACE_URI)
        .attr("version", version)
}

/// Format a number the way C's `%.15g` does.
pub fn format_g(value: f64) -> String {
    const PRECISION: usize = 15;

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Exponent after rounding to PRECISION significant digits
    let sci = format!("{:.*e}", PRECISION - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exp < 0 { '-' } else { '+' },
            exp.abs()
        )
    } else {
        let decimals = (PRECISION as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn corner(x: f64, y: f64) -> String {
    format!("{} {}", format_g(x), format_g(y))
}

/// `<ows:BoundingBox crs=".." dimensions="2">` with lower/upper corners.
pub fn bounding_box(crs: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Element {
    Element::new("ows:BoundingBox")
        .attr("crs", crs)
        .attr("dimensions", "2")
        .child(Element::with_text("ows:LowerCorner", corner(min_x, min_y)))
        .child(Element::with_text("ows:UpperCorner", corner(max_x, max_y)))
}

/// `<ows:WGS84BoundingBox dimensions="2">` with lower/upper corners.
pub fn wgs84_bounding_box(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Element {
    Element::new("ows:WGS84BoundingBox")
        .attr("dimensions", "2")
        .child(Element::with_text("ows:LowerCorner", corner(min_x, min_y)))
        .child(Element::with_text("ows:UpperCorner", corner(max_x, max_y)))
}

/// Image-space, native and WGS84 bounding boxes of a coverage, in that order.
pub fn coverage_bounding_boxes(cm: &CoverageMetadata) -> [Element; 3] {
    [
        bounding_box(
            IMAGE_CRS_URN,
            0.0,
            0.0,
            cm.xsize as f64 - 1.0,
            cm.ysize as f64 - 1.0,
        ),
        bounding_box(
            &cm.native_crs_urn,
            cm.extent.min_x,
            cm.extent.min_y,
            cm.extent.max_x,
            cm.extent.max_y,
        ),
        wgs84_bounding_box(
            cm.wgs84_extent.min_x,
            cm.wgs84_extent.min_y,
            cm.wgs84_extent.max_x,
            cm.wgs84_extent.max_y,
        ),
    ]
}

/// `<ows:ServiceIdentification>` from the catalogue's service metadata.
pub fn service_identification(
    catalogue: &ServiceCatalogue,
    service_type: &str,
    version: &str,
) -> Element {
    let md = &catalogue.metadata;
    let mut el = Element::new("ows:ServiceIdentification");

    el.push_text(
        "ows:Title",
        md.lookup(NAMESPACES, "title")
            .unwrap_or(catalogue.name.as_str()),
    );
    if let Some(abstract_text) = md.lookup(NAMESPACES, "abstract") {
        el.push_text("ows:Abstract", abstract_text);
    }
    if let Some(keywords) = md.lookup(NAMESPACES, "keywordlist") {
        generate_list(el.push(Element::new("ows:Keywords")), "ows:Keyword", keywords, ',');
    }
    el.push(Element::with_text("ows:ServiceType", service_type).attr("codeSpace", "OGC"));
    el.push_text("ows:ServiceTypeVersion", version);
    el.push_text("ows:Fees", md.lookup_or(NAMESPACES, "fees", "NONE"));
    el.push_text(
        "ows:AccessConstraints",
        md.lookup_or(NAMESPACES, "accessconstraints", "NONE"),
    );

    el
}

/// `<ows:ServiceProvider>` from the catalogue's contact metadata.
/// Absent values are left out.
pub fn service_provider(catalogue: &ServiceCatalogue) -> Element {
    let md = &catalogue.metadata;
    let mut el = Element::new("ows:ServiceProvider");

    el.push_text(
        "ows:ProviderName",
        md.lookup_or(NAMESPACES, "contactorganization", ""),
    );
    if let Some(site) = md.lookup(NAMESPACES, "service_onlineresource") {
        el.push(link("ows:ProviderSite", site));
    }

    let mut contact = Element::new("ows:ServiceContact");
    push_opt(&mut contact, md, "ows:IndividualName", "contactperson");
    push_opt(&mut contact, md, "ows:PositionName", "contactposition");

    let mut info = Element::new("ows:ContactInfo");

    let mut phone = Element::new("ows:Phone");
    push_opt(&mut phone, md, "ows:Voice", "contactvoicetelephone");
    push_opt(&mut phone, md, "ows:Facsimile", "contactfacsimiletelephone");
    push_non_empty(&mut info, phone);

    let mut address = Element::new("ows:Address");
    push_opt(&mut address, md, "ows:DeliveryPoint", "address");
    push_opt(&mut address, md, "ows:City", "city");
    push_opt(&mut address, md, "ows:AdministrativeArea", "stateorprovince");
    push_opt(&mut address, md, "ows:PostalCode", "postcode");
    push_opt(&mut address, md, "ows:Country", "country");
    push_opt(
        &mut address,
        md,
        "ows:ElectronicMailAddress",
        "contactelectronicmailaddress",
    );
    push_non_empty(&mut info, address);

    if let Some(site) = md.lookup(NAMESPACES, "service_onlineresource") {
        info.push(link("ows:OnlineResource", site));
    }
    push_opt(&mut info, md, "ows:HoursOfService", "hoursofservice");
    push_opt(&mut info, md, "ows:ContactInstructions", "contactinstructions");
    push_non_empty(&mut contact, info);

    push_opt(&mut contact, md, "ows:Role", "role");
    push_non_empty(&mut el, contact);

    el
}

fn push_opt(parent: &mut Element, md: &Metadata, name: &str, key: &str) {
    if let Some(value) = md.lookup(NAMESPACES, key) {
        parent.push_text(name, value);
    }
}

fn push_non_empty(parent: &mut Element, child: Element) {
    if !child.children().is_empty() {
        parent.push(child);
    }
}

fn link(name: &str, href: &str) -> Element {
    Element::new(name)
        .attr("xlink:type", "simple")
        .attr("xlink:href", href)
}

/// `<ows:Operation>` reachable with HTTP GET at `url`.
pub fn operation(name: &str, url: &str) -> Element {
    Element::new("ows:Operation").attr("name", name).child(
        Element::new("ows:DCP")
            .child(Element::new("ows:HTTP").child(link("ows:Get", url))),
    )
}

/// `<ows:Parameter>` whose allowed values are the comma-separated `values`.
pub fn parameter(name: &str, values: &str) -> Element {
    let mut allowed = Element::new("ows:AllowedValues");
    generate_list(&mut allowed, "ows:Value", values, ',');
    // AllowedValues must hold at least one Value.
    if allowed.children().is_empty() {
        allowed.push(Element::new("ows:Value"));
    }
    Element::new("ows:Parameter").attr("name", name).child(allowed)
}
