//! FIX 4.4 tag numbers used by the acceptor.

/// AvgPx.
pub const AVG_PX: u32 = 6;
/// ClOrdID.
pub const CL_ORD_ID: u32 = 11;
/// CumQty.
pub const CUM_QTY: u32 = 14;
/// ExecID.
pub const EXEC_ID: u32 = 17;
/// HandlInst.
pub const HANDL_INST: u32 = 21;
/// MsgSeqNum (header).
pub const MSG_SEQ_NUM: u32 = 34;
/// MsgType (header).
pub const MSG_TYPE: u32 = 35;
/// OrderID.
pub const ORDER_ID: u32 = 37;
/// OrderQty.
pub const ORDER_QTY: u32 = 38;
/// OrdStatus.
pub const ORD_STATUS: u32 = 39;
/// OrdType.
pub const ORD_TYPE: u32 = 40;
/// Price.
pub const PRICE: u32 = 44;
/// RefSeqNum.
pub const REF_SEQ_NUM: u32 = 45;
/// SenderCompID (header).
pub const SENDER_COMP_ID: u32 = 49;
/// Side.
pub const SIDE: u32 = 54;
/// Symbol.
pub const SYMBOL: u32 = 55;
/// TargetCompID (header).
pub const TARGET_COMP_ID: u32 = 56;
/// Text.
pub const TEXT: u32 = 58;
/// TimeInForce.
pub const TIME_IN_FORCE: u32 = 59;
/// TransactTime.
pub const TRANSACT_TIME: u32 = 60;
/// OrdRejReason.
pub const ORD_REJ_REASON: u32 = 103;
/// ExecType.
pub const EXEC_TYPE: u32 = 150;
/// LeavesQty.
pub const LEAVES_QTY: u32 = 151;
/// RefTagID.
pub const REF_TAG_ID: u32 = 371;
/// RefMsgType.
pub const REF_MSG_TYPE: u32 = 372;
/// SessionRejectReason.
pub const SESSION_REJECT_REASON: u32 = 373;
