//! Admit Order Use Case
//!
//! Validates a parsed new-order request, builds the execution report and
//! sends it back to the originating session.

use std::sync::Arc;

use crate::application::ports::{
    AdmissionEvent, OutboundMessage, ReportSinkPort, ReportSummary, SessionPort,
};
use crate::application::services::{DeliveryFailure, DeliveryService, ExecutionReportBuilder};
use crate::domain::order_admission::{ExecutionReport, NewOrderRequest};
use crate::domain::risk_control::{OrderValidator, ValidationResult};
use crate::domain::shared::SessionId;

/// Use case for answering a new-order request.
pub struct AdmitOrderUseCase<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    validator: OrderValidator,
    builder: ExecutionReportBuilder,
    delivery: Arc<DeliveryService<S>>,
    sink: Arc<R>,
}

impl<S, R> AdmitOrderUseCase<S, R>
where
    S: SessionPort,
    R: ReportSinkPort,
{
    /// Create a new `AdmitOrderUseCase`.
    pub const fn new(
        validator: OrderValidator,
        builder: ExecutionReportBuilder,
        delivery: Arc<DeliveryService<S>>,
        sink: Arc<R>,
    ) -> Self {
        Self {
            validator,
            builder,
            delivery,
            sink,
        }
    }

    /// Answer `request` from `session`.
    ///
    /// Exactly one execution report is built. It is sent until the session
    /// layer takes it or the retry policy gives up; either way the outcome
    /// goes to the report sink.
    pub fn execute(
        &self,
        request: &NewOrderRequest,
        session: &SessionId,
    ) -> Result<ExecutionReport, DeliveryFailure> {
        // 1. Validate
        let decision = self.validator.validate(request);
        match &decision {
            ValidationResult::Accepted => tracing::debug!(
                session = %session,
                cl_ord_id = %request.client_order_id,
                symbol = %request.symbol,
                "Order passed risk controls"
            ),
            ValidationResult::Rejected {
                reason,
                reject_code,
            } => tracing::debug!(
                session = %session,
                cl_ord_id = %request.client_order_id,
                symbol = %request.symbol,
                reject_code = %reject_code,
                reason = %reason,
                "Order failed risk controls"
            ),
        }

        // 2. Build
        let report = self.builder.build(request, &decision);

        // 3. Deliver
        let outbound = OutboundMessage::ExecutionReport(report.clone());
        match self.delivery.deliver(session, &outbound) {
            Ok(_) => {
                self.sink.record(AdmissionEvent::ReportSent {
                    session: session.clone(),
                    report: ReportSummary::from(&report),
                });
                Ok(report)
            }
            Err(failure) => {
                self.sink.record(AdmissionEvent::DeliveryFailed {
                    session: session.clone(),
                    msg_type: outbound.msg_type(),
                    error: failure.error.clone(),
                    attempts: failure.attempts,
                });
                Err(failure)
            }
        }
    }
}
