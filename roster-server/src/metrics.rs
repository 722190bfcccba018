//! Prometheus metrics collection for Roster server

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

/// Initialize all metric descriptions
pub fn init_metrics() {
    // Counters
    describe_counter!("roster_http_requests_total", "Total number of HTTP requests by method and status");
    describe_counter!("roster_auth_rejections_total", "Total number of requests rejected by the authenticator");
    describe_counter!("roster_internal_errors_total", "Total number of failures caught by the exception boundary");
    describe_counter!("roster_user_mutations_total", "Total number of successful user mutations");

    // Histograms
    describe_histogram!("roster_http_request_latency_seconds", "Handler latency in seconds, measured by the request logger");

    // Gauges
    describe_gauge!("roster_users", "Number of users in the store");
}

/// Record a completed request
pub fn record_request(method: &str, status: u16, latency_seconds: f64) {
    counter!(
        "roster_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("roster_http_request_latency_seconds").record(latency_seconds);
}

/// Record a request turned away for a missing or invalid token
pub fn record_auth_rejection() {
    counter!("roster_auth_rejections_total").increment(1);
}

/// Record a failure caught by the exception boundary (`error` or `panic`)
pub fn record_internal_error(kind: &'static str) {
    counter!("roster_internal_errors_total", "kind" => kind).increment(1);
}

/// Record a successful create, update or delete
pub fn record_mutation(operation: &'static str) {
    counter!("roster_user_mutations_total", "operation" => operation).increment(1);
}

/// Update the stored users gauge
pub fn update_user_count(count: usize) {
    gauge!("roster_users").set(count as f64);
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<metrics_exporter_prometheus::PrometheusHandle> =
    std::sync::OnceLock::new();

/// Initialize Prometheus exporter and return the handle
pub fn init_prometheus() -> anyhow::Result<()> {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Get Prometheus metrics string
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
