//! Application metrics collection.

use metrics::counter;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the WCS API.
///
/// Counters go to the global `metrics` recorder (Prometheus in production)
/// and are mirrored locally so tests and logs can read them back.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    pub requests: AtomicU64,
    pub exceptions: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validated WCS request
    pub fn record_request(&self, request: &'static str) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        counter!("wcs_requests_total", "request" => request).increment(1);
    }

    /// Record an exception report sent in place of a payload
    pub fn record_exception(&self, code: &'static str) {
        self.exceptions.fetch_add(1, Ordering::Relaxed);
        counter!("wcs_exceptions_total", "code" => code).increment(1);
    }

    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn exception_count(&self) -> u64 {
        self.exceptions.load(Ordering::Relaxed)
    }
}
