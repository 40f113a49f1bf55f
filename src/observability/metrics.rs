//! Metrics collection and exposition.
//!
//! # Metrics
//! - `broker_requests_total` (counter): inbound dispatch requests by action, status
//! - `broker_request_duration_seconds` (histogram): inbound latency by action
//! - `broker_downstream_calls_total` (counter): downstream calls by service, outcome
//! - `broker_downstream_duration_seconds` (histogram): downstream latency by service
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(action: &'static str, status: u16, start: Instant) {
    counter!("broker_requests_total", "action" => action, "status" => status.to_string())
        .increment(1);
    histogram!("broker_request_duration_seconds", "action" => action)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_downstream(service: &'static str, outcome: &'static str, start: Instant) {
    counter!("broker_downstream_calls_total", "service" => service, "outcome" => outcome)
        .increment(1);
    histogram!("broker_downstream_duration_seconds", "service" => service)
        .record(start.elapsed().as_secs_f64());
}
