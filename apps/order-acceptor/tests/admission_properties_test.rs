//! Property tests for risk validation and report delivery.
//!
//! Generates requests around the configured ceilings and checks the
//! admission rules hold for every input, not just the hand-picked ones.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use order_acceptor::domain::messaging::tags;
use order_acceptor::{
    AdmitOrderUseCase, AvgPxPolicy, DeliveryError, DeliveryRetryPolicy, DeliveryService, ExecType,
    ExecutionReportBuilder, IdGenerator, Message, MsgType, NewOrderRequest, NoOpReportSink,
    OrdRejReason, OrdStatus, OrderValidator, OutboundMessage, RiskControlTable, SessionId,
    SessionPort, TradingControl, ValidationResult,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MAX_QTY: u64 = 100_000;
const MAX_PRICE_CENTS: i64 = 32_030;

fn validator() -> OrderValidator {
    let table = RiskControlTable::from_controls([TradingControl::new(
        "AAPL",
        Decimal::new(MAX_PRICE_CENTS, 2),
        MAX_QTY,
    )])
    .unwrap();
    OrderValidator::new(Arc::new(table))
}

fn request(cl_ord_id: &str, symbol: &str, qty: u64, price_cents: Option<i64>) -> NewOrderRequest {
    let mut message = Message::new(MsgType::NewOrderSingle)
        .with_header(tags::SENDER_COMP_ID, "TRADER1")
        .with_field(tags::CL_ORD_ID, cl_ord_id)
        .with_field(tags::SIDE, "1")
        .with_field(tags::TRANSACT_TIME, "20240102-14:30:00.000")
        .with_field(tags::SYMBOL, symbol)
        .with_field(tags::ORDER_QTY, qty.to_string());
    match price_cents {
        Some(cents) => {
            message.body.set(tags::ORD_TYPE, "2");
            message
                .body
                .set(tags::PRICE, Decimal::new(cents, 2).to_string());
        }
        None => {
            message.body.set(tags::ORD_TYPE, "1");
        }
    }
    NewOrderRequest::from_message(&message).unwrap()
}

fn reason(result: &ValidationResult) -> &str {
    result.reason().expect("rejected result carries a reason")
}

// ============================================
// Validation Properties
// ============================================

proptest! {
    #[test]
    fn prop_unknown_symbol_always_rejects(
        symbol in "[A-Z]{1,6}".prop_filter("configured symbol", |s| s != "AAPL"),
        qty in 1u64..MAX_QTY,
        cents in 1i64..MAX_PRICE_CENTS,
    ) {
        let result = validator().validate(&request("P-1", &symbol, qty, Some(cents)));

        prop_assert_eq!(result.reject_code(), Some(OrdRejReason::UnknownSymbol));
        prop_assert!(reason(&result).contains(&symbol));
    }

    #[test]
    fn prop_quantity_at_or_over_limit_rejects(
        qty in MAX_QTY..MAX_QTY * 10,
        cents in 1i64..MAX_PRICE_CENTS,
    ) {
        let result = validator().validate(&request("P-2", "AAPL", qty, Some(cents)));

        prop_assert_eq!(result.reject_code(), Some(OrdRejReason::IncorrectQuantity));
        prop_assert!(reason(&result).contains("quantity"));
    }

    #[test]
    fn prop_price_at_or_over_limit_rejects(
        qty in 1u64..MAX_QTY,
        cents in MAX_PRICE_CENTS..MAX_PRICE_CENTS * 10,
    ) {
        let result = validator().validate(&request("P-3", "AAPL", qty, Some(cents)));

        prop_assert_eq!(
            result.reject_code(),
            Some(OrdRejReason::PriceExceedsCurrentPriceBand)
        );
        prop_assert!(reason(&result).contains("price"));
    }

    #[test]
    fn prop_both_violations_are_joined(
        qty in MAX_QTY..MAX_QTY * 10,
        cents in MAX_PRICE_CENTS..MAX_PRICE_CENTS * 10,
    ) {
        let result = validator().validate(&request("P-4", "AAPL", qty, Some(cents)));

        prop_assert_eq!(result.reject_code(), Some(OrdRejReason::OrderExceedsLimit));
        let clauses: Vec<_> = reason(&result).split(" | ").collect();
        prop_assert_eq!(clauses.len(), 2);
        prop_assert!(clauses[0].contains("quantity"));
        prop_assert!(clauses[1].contains("price"));
    }

    #[test]
    fn prop_market_orders_only_check_quantity(qty in 1u64..MAX_QTY) {
        let result = validator().validate(&request("P-5", "AAPL", qty, None));
        prop_assert!(result.is_accepted());
    }

    #[test]
    fn prop_accepted_report_is_unfilled(
        qty in 1u64..MAX_QTY,
        cents in 1i64..MAX_PRICE_CENTS,
    ) {
        let req = request("P-6", "AAPL", qty, Some(cents));
        let result = validator().validate(&req);
        prop_assert!(result.is_accepted());

        let builder = ExecutionReportBuilder::new(
            Arc::new(IdGenerator::with_epoch("PT", 1)),
            AvgPxPolicy::Zero,
        );
        let report = builder.build(&req, &result);

        prop_assert_eq!(report.exec_type, ExecType::New);
        prop_assert_eq!(report.ord_status, OrdStatus::New);
        prop_assert_eq!(report.leaves_qty, Decimal::from(qty));
        prop_assert_eq!(report.cum_qty, Decimal::ZERO);
        prop_assert_eq!(report.avg_px, Decimal::ZERO);
        prop_assert_eq!(report.order_id.as_str(), "TRADER1-P-6");
    }
}

// ============================================
// Exactly-Once Delivery
// ============================================

/// Session port that fails the first `flaky` sends of every ClOrdID, then
/// counts deliveries.
struct CountingSessionPort {
    flaky: u32,
    attempts: Mutex<HashMap<String, u32>>,
    delivered: Mutex<HashMap<String, u32>>,
}

impl CountingSessionPort {
    fn new(flaky: u32) -> Self {
        Self {
            flaky,
            attempts: Mutex::new(HashMap::new()),
            delivered: Mutex::new(HashMap::new()),
        }
    }

    fn delivered(&self, cl_ord_id: &str) -> u32 {
        self.delivered
            .lock()
            .unwrap()
            .get(cl_ord_id)
            .copied()
            .unwrap_or(0)
    }
}

impl SessionPort for CountingSessionPort {
    fn send_to_target(
        &self,
        session: &SessionId,
        message: &OutboundMessage,
    ) -> Result<(), DeliveryError> {
        let OutboundMessage::ExecutionReport(report) = message else {
            return Ok(());
        };
        let key = report.client_order_id.as_str().to_string();

        let mut attempts = self.attempts.lock().unwrap();
        let seen = attempts.entry(key.clone()).or_insert(0);
        *seen += 1;
        if *seen <= self.flaky {
            return Err(DeliveryError::Transport {
                session: session.clone(),
                message: "link busy".to_string(),
            });
        }

        *self.delivered.lock().unwrap().entry(key).or_insert(0) += 1;
        Ok(())
    }
}

fn use_case(
    port: &Arc<CountingSessionPort>,
    max_attempts: u32,
) -> AdmitOrderUseCase<CountingSessionPort, NoOpReportSink> {
    AdmitOrderUseCase::new(
        validator(),
        ExecutionReportBuilder::new(Arc::new(IdGenerator::new("PT")), AvgPxPolicy::Zero),
        Arc::new(DeliveryService::new(
            Arc::clone(port),
            DeliveryRetryPolicy::new(max_attempts, Duration::ZERO, Duration::ZERO, 1.0, 0.0),
        )),
        Arc::new(NoOpReportSink),
    )
}

#[test]
fn test_every_request_is_delivered_once() {
    let port = Arc::new(CountingSessionPort::new(0));
    let admit = use_case(&port, 3);
    let session = SessionId::new("FIX.4.4:BROKER->TRADER1");

    let requests = [
        request("E-1", "AAPL", 100, Some(9_950)),
        request("E-2", "BOZO", 100, Some(9_950)),
        request("E-3", "AAPL", 250_000, Some(40_000)),
        request("E-4", "AAPL", 10, None),
    ];
    for req in &requests {
        admit.execute(req, &session).unwrap();
    }

    for id in ["E-1", "E-2", "E-3", "E-4"] {
        assert_eq!(port.delivered(id), 1, "{id}");
    }
}

#[test]
fn test_retried_delivery_still_sends_once() {
    let port = Arc::new(CountingSessionPort::new(2));
    let admit = use_case(&port, 3);
    let session = SessionId::new("FIX.4.4:BROKER->TRADER1");

    let report = admit
        .execute(&request("R-1", "AAPL", 100, Some(9_950)), &session)
        .unwrap();

    assert_eq!(report.leaves_qty, dec!(100));
    assert_eq!(port.delivered("R-1"), 1);
}

#[test]
fn test_exhausted_retries_deliver_nothing() {
    let port = Arc::new(CountingSessionPort::new(5));
    let admit = use_case(&port, 3);
    let session = SessionId::new("FIX.4.4:BROKER->TRADER1");

    let failure = admit
        .execute(&request("R-2", "AAPL", 100, Some(9_950)), &session)
        .unwrap_err();

    assert_eq!(failure.attempts, 3);
    assert_eq!(port.delivered("R-2"), 0);
}
