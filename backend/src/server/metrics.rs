//! Prometheus request metrics exposed at `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

const NAMESPACE: &str = "loan_desk";
const ENDPOINT: &str = "/metrics";

/// Build the Prometheus middleware.
///
/// # Errors
///
/// Returns [`std::io::Error`] when metric registration fails.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(NAMESPACE)
        .endpoint(ENDPOINT)
        .build()
        .map_err(|error| std::io::Error::other(format!("prometheus metrics: {error}")))
}
