//! Shared response helpers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use wcs_common::WcsError;
use wcs_protocol::{exception_for, XmlDocument};

pub const XML_CONTENT_TYPE: &str = "text/xml";

/// Serialize a finished document as a `text/xml` response.
pub fn xml_response(doc: &XmlDocument) -> Result<Response, WcsError> {
    let body = doc.to_latin1_bytes()?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response())
}

/// OWS exception report in place of the requested payload.
pub fn exception_response(err: &WcsError, version: &str) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match exception_for(err, version).to_latin1_bytes() {
        Ok(body) => (status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize exception report");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
