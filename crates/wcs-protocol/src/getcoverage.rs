//! Multipart delivery of a rendered coverage.

use tracing::{debug, error};

use wcs_common::{ImageEncoder, OutputFormat, RenderedImage, WcsError, WcsResult};

/// Boundary token separating the parts.
pub const BOUNDARY: &str = "wcs";

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Complete GetCoverage response: content type plus body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageEnvelope {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Encode `image` as `format` and wrap it in a two-part `multipart/mixed`
/// message: a `<Coverages>` manifest, then the binary coverage.
///
/// The image is encoded before any envelope bytes are produced, so an
/// encoder failure (`NoApplicableCode`) never leaves a truncated message.
pub fn wrap_coverage(
    image: &RenderedImage,
    format: &OutputFormat,
    encoder: &dyn ImageEncoder,
) -> WcsResult<CoverageEnvelope> {
    let data = encoder.encode(image, format).map_err(|e| {
        error!(format = %format.name, error = %e, "Coverage encoding failed");
        WcsError::NoApplicableCode(format!("Failed to encode coverage as {}: {}", format.name, e))
    })?;

    let mime_type = format.mime_type().unwrap_or(DEFAULT_MIME_TYPE);
    let ext = &format.extension;

    let mut body = format!(
        "--{b}\n\
         Content-Type: text/xml\n\
         Content-ID: wcs.xml\n\
         \n\
         {manifest}\
         --{b}\n\
         Content-Type: {mime_type}\n\
         Content-Description: coverage data\n\
         Content-Transfer-Encoding: binary\n\
         Content-ID: coverage/wcs.{ext}\n\
         Content-Disposition: INLINE\n\
         \n",
        b = BOUNDARY,
        manifest = coverages_manifest(ext),
    )
    .into_bytes();

    body.reserve(data.len() + 16);
    body.extend_from_slice(&data);
    body.extend_from_slice(format!("\n--{}--\n", BOUNDARY).as_bytes());

    debug!(
        format = %format.name,
        bytes = data.len(),
        "Coverage wrapped in multipart envelope"
    );

    Ok(CoverageEnvelope {
        content_type: format!("multipart/mixed; boundary={}", BOUNDARY),
        body,
    })
}

fn coverages_manifest(ext: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Coverages
     xmlns="http://www.opengis.net/wcs/1.1"
     xmlns:ows="http://www.opengis.net/ows"
     xmlns:xlink="http://www.w3.org/1999/xlink"
     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
     xsi:schemaLocation="http://www.opengis.net/ows/1.1 ../owsCoverages.xsd">
  <Coverage>
    <Reference xlink:href="cid:coverage/wcs.{ext}"/>
  </Coverage>
</Coverages>
"#
    )
}
