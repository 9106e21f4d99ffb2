//! Prometheus metrics for the order acceptor.
//!
//! Counters are recorded through the `metrics` facade and are no-ops until
//! an exporter is installed with [`init_metrics`].
//!
//! # Example
//!
//! ```ignore
//! use order_acceptor::observability::{init_metrics, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::with_addr("127.0.0.1:9090".parse()?))?;
//! record_execution_report("NEW", None);
//! ```

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
}

impl MetricsConfig {
    /// Create a metrics configuration for `addr`.
    #[must_use]
    pub const fn with_addr(addr: SocketAddr) -> Self {
        Self { listen_addr: addr }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`. Must be
/// called from within a Tokio runtime.
///
/// # Errors
///
/// Returns an error if the metrics exporter fails to start (e.g., port already in use).
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// Admission Metrics
// ============================================================================

/// Record a delivered execution report.
///
/// # Arguments
///
/// * `exec_type` - `"NEW"` or `"REJECTED"`
/// * `reject_code` - Reject reason label, rejections only
pub fn record_execution_report(exec_type: &str, reject_code: Option<&str>) {
    counter!(
        "order_acceptor_execution_reports_total",
        "exec_type" => exec_type.to_string(),
        "reject_code" => reject_code.unwrap_or("none").to_string()
    )
    .increment(1);
}

/// Record a delivered session-level reject.
///
/// # Arguments
///
/// * `reason` - Session reject reason label (e.g., `"REQUIRED_TAG_MISSING"`)
pub fn record_protocol_reject(reason: &str) {
    counter!(
        "order_acceptor_protocol_rejects_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record an outbound message that could not be delivered.
///
/// # Arguments
///
/// * `kind` - Delivery error kind (e.g., `"session_not_found"`)
pub fn record_delivery_failure(kind: &str) {
    counter!(
        "order_acceptor_delivery_failures_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

// ============================================================================
// Session Metrics
// ============================================================================

/// Record a session lifecycle event (`"created"`, `"logged_on"`, `"logged_out"`).
pub fn record_session_event(event: &str) {
    counter!(
        "order_acceptor_session_events_total",
        "event" => event.to_string()
    )
    .increment(1);
}

/// Record an application message that was logged and dropped.
pub fn record_unhandled_message(msg_type: &str) {
    counter!(
        "order_acceptor_unhandled_messages_total",
        "msg_type" => msg_type.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_exporter_is_a_no_op() {
        record_execution_report("NEW", None);
        record_execution_report("REJECTED", Some("UNKNOWN_SYMBOL"));
        record_protocol_reject("REQUIRED_TAG_MISSING");
        record_delivery_failure("session_not_found");
        record_session_event("logged_on");
        record_unhandled_message("8");
    }

    #[test]
    fn metrics_config_with_addr() {
        let addr: SocketAddr = "127.0.0.1:9464".parse().unwrap();
        assert_eq!(MetricsConfig::with_addr(addr).listen_addr, addr);
    }
}
