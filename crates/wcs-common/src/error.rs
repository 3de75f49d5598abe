//! Error types for WCS response generation.

use thiserror::Error;

/// Result type alias using WcsError.
pub type WcsResult<T> = Result<T, WcsError>;

/// Primary error type for WCS operations.
///
/// Every variant ends the response: the dispatcher emits an OWS exception
/// report built from [`WcsError::exception_code`] and [`WcsError::locator`]
/// instead of the intended payload.
#[derive(Debug, Error)]
pub enum WcsError {
    // === Document build errors ===
    #[error("Coverage metadata unavailable for layer '{layer}': {message}")]
    MetadataError { layer: String, message: String },

    #[error("COVERAGE {0} cannot be opened / does not exist")]
    CoverageNotDefined(String),

    // === Infrastructure errors ===
    #[error("{0}")]
    NoApplicableCode(String),

    #[error("Unsupported WCS version: {0}")]
    UnsupportedVersion(String),

    // === Request errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameterValue(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameterValue { param: String, message: String },

    #[error("Operation not supported: {0}")]
    OperationNotSupported(String),
}

impl WcsError {
    pub fn metadata(layer: impl Into<String>, message: impl Into<String>) -> Self {
        WcsError::MetadataError {
            layer: layer.into(),
            message: message.into(),
        }
    }

    /// Get the OWS 1.1 exception code for this error.
    pub fn exception_code(&self) -> &'static str {
        match self {
            WcsError::CoverageNotDefined(_) => "CoverageNotDefined",
            WcsError::UnsupportedVersion(_) => "VersionNegotiationFailed",
            WcsError::MissingParameterValue(_) => "MissingParameterValue",
            WcsError::InvalidParameterValue { .. } => "InvalidParameterValue",
            WcsError::OperationNotSupported(_) => "OperationNotSupported",
            WcsError::MetadataError { .. } | WcsError::NoApplicableCode(_) => "NoApplicableCode",
        }
    }

    /// Get the exception locator (offending identifier or parameter name).
    pub fn locator(&self) -> Option<&str> {
        match self {
            WcsError::CoverageNotDefined(id) => Some(id),
            WcsError::MissingParameterValue(param) => Some(param),
            WcsError::InvalidParameterValue { param, .. } => Some(param),
            WcsError::OperationNotSupported(op) => Some(op),
            WcsError::MetadataError { layer, .. } => Some(layer),
            WcsError::UnsupportedVersion(_) => Some("version"),
            WcsError::NoApplicableCode(_) => None,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WcsError::MissingParameterValue(_)
            | WcsError::InvalidParameterValue { .. }
            | WcsError::UnsupportedVersion(_)
            | WcsError::OperationNotSupported(_) => 400,

            WcsError::CoverageNotDefined(_) => 404,

            WcsError::MetadataError { .. } | WcsError::NoApplicableCode(_) => 500,
        }
    }
}
