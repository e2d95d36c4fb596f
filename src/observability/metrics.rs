//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pawnshop_offers_total` (counter): answered offers by outcome
//! - `pawnshop_policy_rejections_total` (counter): offers stopped by a rule
//! - `pawnshop_connection_errors_total` (counter): per-connection failures by kind
//! - `pawnshop_connections_active` (gauge): connections being handled
//! - `pawnshop_inventory_min_value` (gauge): cached smallest inventory value

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_offer(outcome: &'static str) {
    metrics::counter!("pawnshop_offers_total", "outcome" => outcome).increment(1);
}

pub fn record_policy_rejection(rule: &str) {
    metrics::counter!("pawnshop_policy_rejections_total", "rule" => rule.to_string()).increment(1);
}

pub fn record_connection_error(kind: &'static str) {
    metrics::counter!("pawnshop_connection_errors_total", "kind" => kind).increment(1);
}

pub fn record_connection_opened() {
    metrics::gauge!("pawnshop_connections_active").increment(1.0);
}

pub fn record_connection_closed() {
    metrics::gauge!("pawnshop_connections_active").decrement(1.0);
}

pub fn record_inventory_min(value: i64) {
    metrics::gauge!("pawnshop_inventory_min_value").set(value as f64);
}
