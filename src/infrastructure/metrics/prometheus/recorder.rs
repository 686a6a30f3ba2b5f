use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder globally, once per process.
///
/// Later calls reuse the first recorder, so routers built repeatedly (as in
/// tests) all render the same registry.
pub fn init_metrics() -> Result<()> {
    HANDLE.get_or_try_init(|| PrometheusBuilder::new().install_recorder())?;
    Ok(())
}

/// Render the current metrics in Prometheus text format.
pub fn render_metrics() -> String {
    HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}
