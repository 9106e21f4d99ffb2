//! Observability module for metrics.
//!
//! Prometheus counters for admission outcomes and session lifecycle.

mod metrics;

pub use self::metrics::{
    MetricsConfig, MetricsError, init_metrics, record_delivery_failure, record_execution_report,
    record_protocol_reject, record_session_event, record_unhandled_message,
};
