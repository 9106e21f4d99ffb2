//! Execution Report Builder
//!
//! Turns a validation decision into the single execution report sent back
//! for a new-order request.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id_generator::IdGenerator;
use crate::domain::order_admission::{ExecType, ExecutionReport, NewOrderRequest, OrdStatus};
use crate::domain::risk_control::ValidationResult;
use crate::domain::shared::OrderId;

/// How AvgPx (6) is filled on a report for an order with no fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AvgPxPolicy {
    /// Always zero.
    #[default]
    Zero,
    /// A fixed placeholder.
    Fixed {
        /// Placeholder value.
        value: Decimal,
    },
    /// The request's limit price, zero when absent.
    OrderPrice,
}

impl AvgPxPolicy {
    /// AvgPx for `request`.
    #[must_use]
    pub fn avg_px(&self, request: &NewOrderRequest) -> Decimal {
        match self {
            Self::Zero => Decimal::ZERO,
            Self::Fixed { value } => *value,
            Self::OrderPrice => request.price.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Builds execution reports.
#[derive(Debug, Clone)]
pub struct ExecutionReportBuilder {
    ids: Arc<IdGenerator>,
    avg_px: AvgPxPolicy,
}

impl ExecutionReportBuilder {
    /// Create a builder.
    #[must_use]
    pub const fn new(ids: Arc<IdGenerator>, avg_px: AvgPxPolicy) -> Self {
        Self { ids, avg_px }
    }

    /// Build the report answering `request` under `decision`.
    ///
    /// Accepted orders get the deterministic `{sender}-{clOrdId}` OrderID
    /// and leave their full quantity open. Rejected orders get a fresh
    /// OrderID and nothing left open. Both copy ClOrdID, Symbol, OrderQty
    /// and Price from the request.
    #[must_use]
    pub fn build(&self, request: &NewOrderRequest, decision: &ValidationResult) -> ExecutionReport {
        let (order_id, exec_type, leaves_qty, reject_text, reject_code) = match decision {
            ValidationResult::Accepted => (
                OrderId::for_admitted(&request.sender_id, &request.client_order_id),
                ExecType::New,
                request.order_qty,
                None,
                None,
            ),
            ValidationResult::Rejected {
                reason,
                reject_code,
            } => (
                self.ids.next_reject_order_id(),
                ExecType::Rejected,
                Decimal::ZERO,
                Some(reason.clone()),
                Some(*reject_code),
            ),
        };

        ExecutionReport {
            order_id,
            exec_id: self.ids.next_exec_id(),
            exec_type,
            ord_status: OrdStatus::from(exec_type),
            side: request.side,
            leaves_qty,
            cum_qty: Decimal::ZERO,
            avg_px: self.avg_px.avg_px(request),
            client_order_id: request.client_order_id.clone(),
            symbol: request.symbol.clone(),
            order_qty: request.order_qty,
            price: request.price,
            transact_time: Utc::now(),
            reject_text,
            reject_code,
        }
    }
}
