use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::error::AppError;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the process-wide Prometheus recorder, once.
///
/// Later calls return the handle installed by the first one.
pub fn init_metrics() -> Result<PrometheusHandle, AppError> {
    PROMETHEUS_HANDLE
        .get_or_try_init(|| {
            PrometheusBuilder::new().install_recorder().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Failed to install Prometheus recorder: {}",
                    e
                ))
            })
        })
        .cloned()
}

/// Render all recorded metrics in Prometheus text format.
pub fn render_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_default()
}
