//! WCS (Web Coverage Service) request handlers.
//!
//! This module handles WCS 1.1 protocol requests:
//! - GetCapabilities: Returns service metadata and available coverages
//! - DescribeCoverage: Returns the grid and range of selected coverages
//! - GetCoverage: Returns a stored coverage wrapped in a multipart envelope

use axum::{
    extract::{Extension, Query},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use wcs_common::{CoverageMetadataSource, LayerEligibility, WcsError, WcsResult};
use wcs_protocol::describe::requested_identifiers;
use wcs_protocol::{
    build_capabilities, build_describe_coverage, resolve_formats, wrap_coverage, RequestContext,
    WcsParams, WcsRequest,
};

use super::common::{exception_response, xml_response};
use crate::loaders::load_raster;
use crate::state::AppState;

/// GET /wcs - KVP entry point
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn wcs_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = WcsParams::from_pairs(pairs);
    let version = params.version().to_string();
    let ctx = request_context(&headers, &uri);

    let result = match params.into_request() {
        Ok(request) => {
            info!(request = request.name(), "WCS request");
            state.metrics.record_request(request.name());
            dispatch(&state, request, &ctx).await
        }
        Err(e) => Err(e),
    };

    result.unwrap_or_else(|err| {
        warn!(code = err.exception_code(), error = %err, "WCS exception");
        state.metrics.record_exception(err.exception_code());
        exception_response(&err, &version)
    })
}

async fn dispatch(state: &AppState, request: WcsRequest, ctx: &RequestContext) -> WcsResult<Response> {
    match request {
        WcsRequest::GetCapabilities(params) => {
            let doc = build_capabilities(&state.catalogue, params, ctx, &state.backend)?;
            xml_response(&doc)
        }
        WcsRequest::DescribeCoverage(params) => {
            let doc = build_describe_coverage(&state.catalogue, params, &state.backend)?;
            xml_response(&doc)
        }
        WcsRequest::GetCoverage(params) => get_coverage(state, params).await,
    }
}

/// Serve one stored coverage as is, in the requested output format.
async fn get_coverage(state: &AppState, params: WcsParams) -> WcsResult<Response> {
    let catalogue = &state.catalogue;

    let identifier = match requested_identifiers(&params.coverages).as_slice() {
        [] => return Err(WcsError::MissingParameterValue("identifier".to_string())),
        [single] => single.clone(),
        _ => {
            return Err(WcsError::InvalidParameterValue {
                param: "identifier".to_string(),
                message: "GetCoverage accepts exactly one coverage".to_string(),
            })
        }
    };

    let layer = catalogue
        .layer_by_name(&identifier)
        .filter(|layer| state.backend.is_layer_supported(layer))
        .ok_or_else(|| WcsError::CoverageNotDefined(identifier.clone()))?;

    let requested_format = params
        .format
        .as_deref()
        .ok_or_else(|| WcsError::MissingParameterValue("format".to_string()))?;
    let format = catalogue
        .output_format_by_name_or_mime(requested_format)
        .filter(|format| {
            format.mime_type().is_some_and(|mime| {
                resolve_formats(catalogue, Some(layer))
                    .iter()
                    .any(|m| m.eq_ignore_ascii_case(mime))
            })
        })
        .ok_or_else(|| WcsError::InvalidParameterValue {
            param: "format".to_string(),
            message: format!("format '{}' is not offered for {}", requested_format, identifier),
        })?;

    let cm = state.backend.coverage_metadata(catalogue, layer)?;
    let path = layer.data.as_deref().ok_or_else(|| {
        WcsError::NoApplicableCode(format!("Coverage {} has no data source", identifier))
    })?;
    let image = load_raster(path, &cm).await?;

    let envelope = wrap_coverage(&image, format, &state.encoder)?;
    info!(
        coverage = %identifier,
        format = %format.name,
        bytes = envelope.body.len(),
        "Coverage delivered"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, envelope.content_type)],
        envelope.body,
    )
        .into_response())
}

/// Where the request was addressed, for deriving the service URL.
fn request_context(headers: &HeaderMap, uri: &Uri) -> RequestContext {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let scheme = header_value("x-forwarded-proto")
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());
    let host = header_value("x-forwarded-host")
        .or_else(|| header_value(header::HOST.as_str()))
        .or_else(|| uri.authority().map(|a| a.to_string()));

    RequestContext::new(scheme, host, uri.path())
}
