//! Metrics collection and exposition.
//!
//! # Metrics
//! - `searoute_http_requests_total` (counter): requests by method, path, status
//! - `searoute_http_request_duration_seconds` (histogram): latency by path
//! - `searoute_cache_outcome_total` (counter): hit / miss / unavailable / malformed
//! - `searoute_cache_writes_total` (counter): ok / error
//! - `searoute_cache_failures_total` (counter): read / write / timeouts
//! - `searoute_store_queries_total` (counter): found / not_found / error
//! - `searoute_provider_failures_total` (counter)
//! - `searoute_field_decode_failures_total` (counter): degraded embedded fields

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    counter!(
        "searoute_http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
    histogram!(
        "searoute_http_request_duration_seconds",
        "path" => path.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_cache_outcome(outcome: &'static str) {
    counter!("searoute_cache_outcome_total", "outcome" => outcome).increment(1);
}

pub fn record_cache_write(result: &'static str) {
    counter!("searoute_cache_writes_total", "result" => result).increment(1);
}

pub fn record_cache_failure(kind: &'static str) {
    counter!("searoute_cache_failures_total", "kind" => kind).increment(1);
}

pub fn record_store_query(result: &'static str) {
    counter!("searoute_store_queries_total", "result" => result).increment(1);
}

pub fn record_provider_failure() {
    counter!("searoute_provider_failures_total").increment(1);
}

pub fn record_field_decode_failure(field: &'static str) {
    counter!("searoute_field_decode_failures_total", "field" => field).increment(1);
}
