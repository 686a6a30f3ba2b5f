//! Prometheus metrics implementation.
//!
//! Delegates to the sibling `counters` and `recorder` modules, which talk to
//! the global `metrics` registry. Metrics register on first use and a single
//! global handle renders them in Prometheus text format.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Holds no state of its own; see the global handle in `recorder.rs`.
pub struct PrometheusMetrics {}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_blog_created(&self) {
        tracing::debug!("Recording blog created event");
        super::increment_blog_created();
    }

    fn record_blog_deleted(&self) {
        tracing::debug!("Recording blog deleted event");
        super::increment_blog_deleted();
    }

    fn record_user_created(&self) {
        tracing::debug!("Recording user created event");
        super::increment_user_created();
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
