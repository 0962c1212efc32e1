//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, endpoint
//! - `proxy_request_duration_seconds` (histogram): latency distribution
//!
//! The recording macros are no-ops until an exporter is installed, so the
//! handler can record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint ready"),
        Err(error) => tracing::error!(error = %error, "failed to install metrics exporter"),
    }
}

/// Record one completed (or failed) forward.
pub fn record_request(method: &str, status: u16, endpoint: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("endpoint", endpoint.to_string()),
    ];

    metrics::counter!("proxy_requests_total", &labels).increment(1);
    metrics::histogram!("proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
