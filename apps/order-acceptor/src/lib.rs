// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Order Acceptor - Rust Core Library
//!
//! Risk-gated order admission for a FIX-style session protocol.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business types and rules
//!   - `messaging`: Inbound/outbound protocol message model, session-level rejects
//!   - `order_admission`: `NewOrderRequest`, `ExecutionReport`, FIX value objects
//!   - `risk_control`: `RiskControlTable` and the `OrderValidator`
//!
//! - **Application**: Orchestration
//!   - `ports`: `SessionPort` (send primitive), `ReportSinkPort` (reporting sink)
//!   - `services`: `IdGenerator`, `ExecutionReportBuilder`, `DeliveryService` (bounded retry)
//!   - `use_cases`: `AdmitOrderUseCase` (validate → build → deliver), `RejectMalformedUseCase`
//!   - `dispatcher`: MsgType-keyed handler registry
//!   - `session`: lifecycle adapter boundary (`SessionApplication`, `Acceptor`)
//!
//! - **Infrastructure**: Adapters
//!   - `session`: In-memory stand-in for the external session layer
//!   - `reporting`: `tracing` + `metrics` backed report sink
//!   - `replay`: JSON-lines session event replay used by the binary
//!
//! # Request lifecycle
//!
//! ```text
//! Received → Validating → {Accepted | Rejected} → ReportSent
//! ```
//!
//! `ReportSent` is terminal. Malformed requests short-circuit to a
//! session-level `Reject` instead of an execution report.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases, dispatch, and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Ambient
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Crate-level error type.
pub mod error;

/// Metrics recording.
pub mod observability;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::messaging::{FieldError, FieldMap, Message, MsgType, SessionReject};
pub use domain::order_admission::{
    ExecType, ExecutionReport, NewOrderRequest, OrdRejReason, OrdStatus, OrderSide, OrderType,
    TimeInForce,
};
pub use domain::risk_control::{OrderValidator, RiskControlTable, TradingControl, ValidationResult};
pub use domain::shared::{ClientOrderId, ExecId, OrderId, SenderId, SessionId, Symbol};

// Application re-exports
pub use application::dispatcher::{
    DispatchOutcome, HandlerRegistry, MessageDispatcher, MessageHandler,
};
pub use application::ports::{
    AdmissionEvent, DeliveryError, NoOpReportSink, OutboundMessage, RecordingReportSink,
    ReportSinkPort, ReportSummary, SessionEvent, SessionPort,
};
pub use application::services::{
    AvgPxPolicy, DeliveryFailure, DeliveryRetryPolicy, DeliveryService, ExecutionReportBuilder,
    ExponentialBackoffCalculator, IdGenerator,
};
pub use application::session::{Acceptor, SessionApplication};
pub use application::use_cases::{AdmitOrderUseCase, RejectMalformedUseCase};

// Infrastructure re-exports
pub use infrastructure::reporting::TracingReportSink;
pub use infrastructure::replay::{OutboundLine, SessionReplay};
pub use infrastructure::session::{InMemorySessionRegistry, SessionState};

pub use config::{Config, ConfigError, load_config, load_config_from_string};
pub use error::{AcceptorError, ErrorCode};
