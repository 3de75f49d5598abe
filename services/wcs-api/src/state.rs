//! Application state and shared resources.

use std::sync::Arc;

use renderer::CoverageEncoder;
use wcs_common::ServiceCatalogue;
use wcs_protocol::CatalogueCoverageSource;

use crate::metrics::MetricsCollector;

/// Shared application state. The catalogue is an immutable snapshot read
/// concurrently by every request.
pub struct AppState {
    pub catalogue: Arc<ServiceCatalogue>,
    pub backend: CatalogueCoverageSource,
    pub encoder: CoverageEncoder,
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    pub fn new(catalogue: ServiceCatalogue) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            backend: CatalogueCoverageSource,
            encoder: CoverageEncoder::new(),
            metrics: Arc::new(MetricsCollector::new()),
        }
    }
}
