//! Inbound new-order request (MsgType `D`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value_objects::{HandlInst, OrderSide, OrderType, TimeInForce};
use crate::domain::messaging::{FieldError, FieldMap, Message, tags};
use crate::domain::shared::{ClientOrderId, SenderId, Symbol};

/// A parsed NewOrderSingle.
///
/// Built per inbound message, consumed by validation and report building,
/// then dropped. Nothing retains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderRequest {
    /// ClOrdID (11).
    pub client_order_id: ClientOrderId,
    /// SenderCompID (header 49).
    pub sender_id: SenderId,
    /// Symbol (55).
    pub symbol: Symbol,
    /// Side (54).
    pub side: OrderSide,
    /// OrderQty (38).
    pub order_qty: Decimal,
    /// Price (44); absent for market and stop orders.
    pub price: Option<Decimal>,
    /// OrdType (40).
    pub order_type: OrderType,
    /// TimeInForce (59).
    pub time_in_force: TimeInForce,
    /// HandlInst (21).
    pub handl_inst: Option<HandlInst>,
    /// TransactTime (60).
    pub transact_time: DateTime<Utc>,
}

impl NewOrderRequest {
    /// Parse a NewOrderSingle.
    ///
    /// Price is only required for order types that carry one; a market order
    /// without tag 44 parses with `price = None`.
    pub fn from_message(message: &Message) -> Result<Self, FieldError> {
        let header = &message.header;
        let body = &message.body;

        let sender_id = SenderId::new(header.require(tags::SENDER_COMP_ID)?);
        let client_order_id = ClientOrderId::new(body.require(tags::CL_ORD_ID)?);
        let side = parse_enum(body, tags::SIDE, OrderSide::from_fix, "unsupported side")?;
        let transact_time = body.require_timestamp(tags::TRANSACT_TIME)?;
        let order_type = parse_enum(
            body,
            tags::ORD_TYPE,
            OrderType::from_fix,
            "unsupported order type",
        )?;
        let symbol = Symbol::new(body.require(tags::SYMBOL)?);

        let order_qty = body.require_decimal(tags::ORDER_QTY)?;
        if order_qty.is_sign_negative() {
            return Err(FieldError::Invalid {
                tag: tags::ORDER_QTY,
                value: order_qty.to_string(),
                reason: "quantity must not be negative".to_string(),
            });
        }

        let price = body.get_decimal(tags::PRICE)?;
        match price {
            None if order_type.requires_price() => {
                return Err(FieldError::Missing { tag: tags::PRICE });
            }
            Some(p) if p.is_sign_negative() => {
                return Err(FieldError::Invalid {
                    tag: tags::PRICE,
                    value: p.to_string(),
                    reason: "price must not be negative".to_string(),
                });
            }
            _ => {}
        }

        let time_in_force = match body.get_char(tags::TIME_IN_FORCE)? {
            Some(code) => TimeInForce::from_fix(code).ok_or_else(|| FieldError::Invalid {
                tag: tags::TIME_IN_FORCE,
                value: code.to_string(),
                reason: "unsupported time in force".to_string(),
            })?,
            None => TimeInForce::default(),
        };

        let handl_inst = match body.get_char(tags::HANDL_INST)? {
            Some(code) => Some(HandlInst::from_fix(code).ok_or_else(|| FieldError::Invalid {
                tag: tags::HANDL_INST,
                value: code.to_string(),
                reason: "unsupported handling instruction".to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            client_order_id,
            sender_id,
            symbol,
            side,
            order_qty,
            price,
            order_type,
            time_in_force,
            handl_inst,
            transact_time,
        })
    }
}

fn parse_enum<T>(
    fields: &FieldMap,
    tag: u32,
    from_fix: fn(char) -> Option<T>,
    reason: &str,
) -> Result<T, FieldError> {
    let code = fields.require_char(tag)?;
    from_fix(code).ok_or_else(|| FieldError::Invalid {
        tag,
        value: code.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messaging::MsgType;
    use rust_decimal_macros::dec;

    fn limit_order() -> Message {
        Message::new(MsgType::NewOrderSingle)
            .with_header(tags::SENDER_COMP_ID, "TRADER1")
            .with_header(tags::MSG_SEQ_NUM, "2")
            .with_field(tags::CL_ORD_ID, "N-1")
            .with_field(tags::SIDE, "1")
            .with_field(tags::TRANSACT_TIME, "20260119-12:00:00.000")
            .with_field(tags::ORD_TYPE, "2")
            .with_field(tags::SYMBOL, "AAPL")
            .with_field(tags::ORDER_QTY, "100")
            .with_field(tags::PRICE, "99.50")
            .with_field(tags::TIME_IN_FORCE, "0")
            .with_field(tags::HANDL_INST, "2")
    }

    fn without(mut message: Message, tag: u32) -> Message {
        message.body = message
            .body
            .iter()
            .filter(|(t, _)| *t != tag)
            .fold(FieldMap::new(), |mut acc, (t, v)| {
                acc.set(t, v);
                acc
            });
        message
    }

    #[test]
    fn parses_limit_order() {
        let order = NewOrderRequest::from_message(&limit_order()).unwrap();
        assert_eq!(order.sender_id.as_str(), "TRADER1");
        assert_eq!(order.client_order_id.as_str(), "N-1");
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.symbol.as_str(), "AAPL");
        assert_eq!(order.order_qty, dec!(100));
        assert_eq!(order.price, Some(dec!(99.50)));
        assert_eq!(order.time_in_force, TimeInForce::Day);
        assert_eq!(order.handl_inst, Some(HandlInst::AutomatedPublic));
    }

    #[test]
    fn market_order_without_price_parses() {
        let message = without(limit_order(), tags::PRICE).with_field(tags::ORD_TYPE, "1");
        let order = NewOrderRequest::from_message(&message).unwrap();
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.price, None);
    }

    #[test]
    fn limit_order_without_price_is_missing_tag_44() {
        let message = without(limit_order(), tags::PRICE);
        assert_eq!(
            NewOrderRequest::from_message(&message),
            Err(FieldError::Missing { tag: tags::PRICE })
        );
    }

    #[test]
    fn missing_sender_is_reported() {
        let mut message = limit_order();
        message.header = FieldMap::new();
        assert_eq!(
            NewOrderRequest::from_message(&message),
            Err(FieldError::Missing {
                tag: tags::SENDER_COMP_ID
            })
        );
    }

    #[test]
    fn missing_symbol_is_reported() {
        let message = without(limit_order(), tags::SYMBOL);
        assert_eq!(
            NewOrderRequest::from_message(&message),
            Err(FieldError::Missing { tag: tags::SYMBOL })
        );
    }

    #[test]
    fn unknown_side_is_invalid() {
        let message = limit_order().with_field(tags::SIDE, "Z");
        assert!(matches!(
            NewOrderRequest::from_message(&message),
            Err(FieldError::Invalid { tag: 54, .. })
        ));
    }

    #[test]
    fn negative_quantity_is_invalid() {
        let message = limit_order().with_field(tags::ORDER_QTY, "-5");
        assert!(matches!(
            NewOrderRequest::from_message(&message),
            Err(FieldError::Invalid { tag: 38, .. })
        ));
    }

    #[test]
    fn absent_time_in_force_defaults_to_day() {
        let message = without(limit_order(), tags::TIME_IN_FORCE);
        let order = NewOrderRequest::from_message(&message).unwrap();
        assert_eq!(order.time_in_force, TimeInForce::Day);
    }
}
