//! OGC WCS 1.1.0 response generation.
//!
//! Supports:
//! - GetCapabilities and DescribeCoverage documents (ISO-8859-1 XML)
//! - GetCoverage multipart delivery of an already rendered coverage
//! - OWS 1.1 exception reports

pub mod capabilities;
pub mod crs;
pub mod describe;
pub mod description;
pub mod exceptions;
pub mod fallback;
pub mod formats;
pub mod getcoverage;
pub mod metadata;
pub mod ows;
pub mod request;
pub mod summary;
pub mod xml;

pub use capabilities::build_capabilities;
pub use crs::{resolve_crs, CrsList};
pub use describe::build_describe_coverage;
pub use description::build_description;
pub use exceptions::{exception_for, exception_report};
pub use fallback::FallbackChain;
pub use formats::{resolve_formats, FormatList};
pub use getcoverage::{wrap_coverage, CoverageEnvelope};
pub use metadata::CatalogueCoverageSource;
pub use request::{RequestContext, WcsParams, WcsRequest};
pub use summary::build_summary;
pub use xml::{Element, XmlDocument};
