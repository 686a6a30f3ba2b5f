// src/infrastructure/metrics/noop/mod.rs
mod noop_metrics;

pub use noop_metrics::NoopMetrics;
use std::sync::Arc;

/// Creates a new no-op metrics implementation.
///
/// All metrics calls are ignored and `render` yields an empty body.
pub fn create() -> anyhow::Result<crate::domain::MetricsPtr> {
    Ok(Arc::new(NoopMetrics::new()))
}
