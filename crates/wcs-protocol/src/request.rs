//! KVP request parameters and request-context helpers.

use wcs_common::{WcsError, WcsResult};

/// Version assumed for GetCapabilities when the client sends none.
pub const DEFAULT_VERSION: &str = "1.1.0";

/// Raw WCS parameters as received, keys matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WcsParams {
    pub service: Option<String>,
    pub version: Option<String>,
    pub request: Option<String>,
    /// One entry per IDENTIFIERS / IDENTIFIER / COVERAGE occurrence.
    pub coverages: Vec<String>,
    pub format: Option<String>,
}

impl WcsParams {
    /// Collect parameters from key/value pairs. Repeated keys other than the
    /// coverage identifiers keep the last value. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            if key.eq_ignore_ascii_case("service") {
                params.service = Some(value.into());
            } else if key.eq_ignore_ascii_case("version") {
                params.version = Some(value.into());
            } else if key.eq_ignore_ascii_case("request") {
                params.request = Some(value.into());
            } else if key.eq_ignore_ascii_case("identifiers")
                || key.eq_ignore_ascii_case("identifier")
                || key.eq_ignore_ascii_case("coverage")
            {
                params.coverages.push(value.into());
            } else if key.eq_ignore_ascii_case("format") {
                params.format = Some(value.into());
            }
        }

        params
    }

    /// The version echoed in responses.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// Validate service and version and pick the operation.
    pub fn into_request(mut self) -> WcsResult<WcsRequest> {
        match self.service.as_deref() {
            Some(service) if service.eq_ignore_ascii_case("WCS") => {}
            Some(service) => {
                return Err(WcsError::InvalidParameterValue {
                    param: "service".to_string(),
                    message: format!("unsupported service '{}'", service),
                })
            }
            None => return Err(WcsError::MissingParameterValue("service".to_string())),
        }

        let request = self
            .request
            .clone()
            .ok_or_else(|| WcsError::MissingParameterValue("request".to_string()))?;

        let kind = if request.eq_ignore_ascii_case("GetCapabilities") {
            RequestKind::GetCapabilities
        } else if request.eq_ignore_ascii_case("DescribeCoverage") {
            RequestKind::DescribeCoverage
        } else if request.eq_ignore_ascii_case("GetCoverage") {
            RequestKind::GetCoverage
        } else {
            return Err(WcsError::OperationNotSupported(request));
        };

        match self.version.as_deref() {
            Some(version) if is_wcs11(version) => {}
            Some(version) => return Err(WcsError::UnsupportedVersion(version.to_string())),
            None if kind == RequestKind::GetCapabilities => {
                self.version = Some(DEFAULT_VERSION.to_string());
            }
            None => return Err(WcsError::MissingParameterValue("version".to_string())),
        }

        Ok(match kind {
            RequestKind::GetCapabilities => WcsRequest::GetCapabilities(self),
            RequestKind::DescribeCoverage => WcsRequest::DescribeCoverage(self),
            RequestKind::GetCoverage => WcsRequest::GetCoverage(self),
        })
    }
}

fn is_wcs11(version: &str) -> bool {
    version == "1.1" || version.starts_with("1.1.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    GetCapabilities,
    DescribeCoverage,
    GetCoverage,
}

/// A validated WCS 1.1 request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WcsRequest {
    GetCapabilities(WcsParams),
    DescribeCoverage(WcsParams),
    GetCoverage(WcsParams),
}

impl WcsRequest {
    /// Operation name as used in the protocol.
    pub fn name(&self) -> &'static str {
        match self {
            WcsRequest::GetCapabilities(_) => "GetCapabilities",
            WcsRequest::DescribeCoverage(_) => "DescribeCoverage",
            WcsRequest::GetCoverage(_) => "GetCoverage",
        }
    }

    pub fn params(&self) -> &WcsParams {
        match self {
            WcsRequest::GetCapabilities(p)
            | WcsRequest::DescribeCoverage(p)
            | WcsRequest::GetCoverage(p) => p,
        }
    }
}

/// What the transport knows about the incoming request, used to derive the
/// service URL when none is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: String,
    /// Host header value, port included
    pub host: Option<String>,
    pub path: String,
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, host: Option<String>, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host,
            path: path.into(),
        }
    }

    /// `scheme://host/path`, or `None` without a host.
    pub fn service_url(&self) -> Option<String> {
        let host = self.host.as_deref().filter(|h| !h.is_empty())?;
        Some(format!("{}://{}{}", self.scheme, host, self.path))
    }
}
