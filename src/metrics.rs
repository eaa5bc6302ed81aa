//! Prometheus metrics for request latency and patient activity.
//!
//! All recording functions go through the `metrics` facade and are no-ops
//! until [`install_recorder`] has run.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Patients created counter metric name.
pub const METRIC_PATIENTS_CREATED: &str = "patients_created_total";
/// Patients updated counter metric name.
pub const METRIC_PATIENTS_UPDATED: &str = "patients_updated_total";
/// Name searches counter metric name.
pub const METRIC_PATIENT_SEARCHES: &str = "patient_searches_total";

/// Install the global Prometheus recorder and register metric descriptions.
pub fn install_recorder() -> Result<PrometheusHandle, metrics_exporter_prometheus::BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(METRIC_PATIENTS_CREATED, "Total number of patients created");
    describe_counter!(METRIC_PATIENTS_UPDATED, "Total number of patient updates");
    describe_counter!(
        METRIC_PATIENT_SEARCHES,
        "Total number of name searches, by outcome"
    );

    debug!("Metrics initialized");
}

/// Record HTTP request latency and count.
pub fn record_http_request(start: Instant, method: &str, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(latency_ms);
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment patients created counter.
pub fn inc_patients_created() {
    counter!(METRIC_PATIENTS_CREATED).increment(1);
}

/// Increment patients updated counter.
pub fn inc_patients_updated() {
    counter!(METRIC_PATIENTS_UPDATED).increment(1);
}

/// Count a name search as a hit or a miss.
pub fn inc_patient_searches(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    counter!(METRIC_PATIENT_SEARCHES, "outcome" => outcome).increment(1);
}

/// Router middleware timing every matched request.
pub async fn track_http(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    record_http_request(start, &method, &route, response.status().as_u16());
    response
}
