//! HTTP request handlers.
//!
//! - `wcs`: WCS 1.1 GetCapabilities, DescribeCoverage and GetCoverage
//! - `metrics`: Health check and Prometheus metrics
//! - `common`: Shared response helpers (XML bodies, exception reports)

pub mod common;
pub mod metrics;
pub mod wcs;

pub use common::{exception_response, xml_response};
pub use metrics::{health_handler, metrics_handler};
pub use wcs::wcs_handler;
