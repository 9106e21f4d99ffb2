//! Outbound execution report (MsgType `8`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{ExecType, OrdRejReason, OrdStatus, OrderSide};
use crate::domain::messaging::{Message, MsgType, format_utc_timestamp, tags};
use crate::domain::shared::{ClientOrderId, ExecId, OrderId, Symbol};

/// Acknowledgement or rejection of a single new-order request.
///
/// Built once, sent once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// OrderID (37).
    pub order_id: OrderId,
    /// ExecID (17).
    pub exec_id: ExecId,
    /// ExecType (150).
    pub exec_type: ExecType,
    /// OrdStatus (39).
    pub ord_status: OrdStatus,
    /// Side (54).
    pub side: OrderSide,
    /// LeavesQty (151).
    pub leaves_qty: Decimal,
    /// CumQty (14).
    pub cum_qty: Decimal,
    /// AvgPx (6).
    pub avg_px: Decimal,
    /// ClOrdID (11), copied from the request.
    pub client_order_id: ClientOrderId,
    /// Symbol (55), copied from the request.
    pub symbol: Symbol,
    /// OrderQty (38), copied from the request.
    pub order_qty: Decimal,
    /// Price (44), copied from the request when set.
    pub price: Option<Decimal>,
    /// TransactTime (60) of the report.
    pub transact_time: DateTime<Utc>,
    /// Text (58), rejections only.
    pub reject_text: Option<String>,
    /// OrdRejReason (103), rejections only.
    pub reject_code: Option<OrdRejReason>,
}

impl ExecutionReport {
    /// True for an admitted order.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self.exec_type, ExecType::New)
    }

    /// True for a rejected order.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self.exec_type, ExecType::Rejected)
    }

    /// Field-level view for the session layer to encode.
    #[must_use]
    pub fn to_message(&self) -> Message {
        let mut message = Message::new(MsgType::ExecutionReport)
            .with_field(tags::ORDER_ID, self.order_id.as_str())
            .with_field(tags::EXEC_ID, self.exec_id.as_str())
            .with_field(tags::EXEC_TYPE, self.exec_type.fix_code())
            .with_field(tags::ORD_STATUS, self.ord_status.fix_code())
            .with_field(tags::SIDE, self.side.fix_code())
            .with_field(tags::LEAVES_QTY, self.leaves_qty.to_string())
            .with_field(tags::CUM_QTY, self.cum_qty.to_string())
            .with_field(tags::AVG_PX, self.avg_px.to_string())
            .with_field(tags::CL_ORD_ID, self.client_order_id.as_str())
            .with_field(tags::SYMBOL, self.symbol.as_str())
            .with_field(tags::ORDER_QTY, self.order_qty.to_string())
            .with_field(tags::TRANSACT_TIME, format_utc_timestamp(&self.transact_time));
        if let Some(price) = self.price {
            message.body.set(tags::PRICE, price.to_string());
        }
        if let Some(text) = &self.reject_text {
            message.body.set(tags::TEXT, text.clone());
        }
        if let Some(code) = self.reject_code {
            message.body.set(tags::ORD_REJ_REASON, code.code().to_string());
        }
        message
    }
}
