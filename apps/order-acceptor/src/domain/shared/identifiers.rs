//! Strongly-typed identifiers for protocol entities.
//!
//! These prevent mixing up a client's ClOrdID with a server OrderID, or a
//! SenderCompID with a session key.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(ClientOrderId, "Counterparty-assigned order identifier (FIX tag 11).");
define_id!(OrderId, "Acceptor-assigned order identifier (FIX tag 37).");
define_id!(ExecId, "Unique identifier of an execution report (FIX tag 17).");
define_id!(SenderId, "Counterparty identifier from the message header (FIX tag 49).");
define_id!(
    SessionId,
    "Opaque key the session layer uses to route outbound messages."
);

impl OrderId {
    /// Deterministic order id for an admitted order: `{sender}-{clOrdId}`.
    ///
    /// Repeated submissions of the same ClOrdID from the same sender map to
    /// the same OrderID.
    #[must_use]
    pub fn for_admitted(sender: &SenderId, client_order_id: &ClientOrderId) -> Self {
        Self(format!("{sender}-{client_order_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_new_and_display() {
        let id = OrderId::new("ord-123");
        assert_eq!(id.as_str(), "ord-123");
        assert_eq!(format!("{id}"), "ord-123");
    }

    #[test]
    fn admitted_order_id_is_sender_dash_clordid() {
        let id = OrderId::for_admitted(&SenderId::new("TRADER1"), &ClientOrderId::new("N-1"));
        assert_eq!(id.as_str(), "TRADER1-N-1");
    }

    #[test]
    fn admitted_order_id_is_stable() {
        let sender = SenderId::new("TRADER1");
        let cl_ord_id = ClientOrderId::new("N-1");
        assert_eq!(
            OrderId::for_admitted(&sender, &cl_ord_id),
            OrderId::for_admitted(&sender, &cl_ord_id)
        );
    }

    #[test]
    fn session_id_from_str() {
        let id: SessionId = "FIX.4.4:BROKER->TRADER1".into();
        assert_eq!(id.as_str(), "FIX.4.4:BROKER->TRADER1");

        let id: SessionId = String::from("s-2").into();
        assert_eq!(id.into_inner(), "s-2");
    }

    #[test]
    fn exec_id_serde_is_transparent() {
        let id = ExecId::new("EXEC-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"EXEC-1\"");
    }
}
