//! Time in force for orders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time in force (FIX tag 59). Absent means [`TimeInForce::Day`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Valid for current trading day only (`0`).
    #[default]
    Day,
    /// Good-til-canceled (`1`).
    Gtc,
    /// At the opening (`2`).
    Opg,
    /// Immediate-or-cancel (`3`).
    Ioc,
    /// Fill-or-kill (`4`).
    Fok,
    /// Good-til-crossing (`5`).
    Gtx,
    /// Good-til-date (`6`).
    Gtd,
    /// At the close (`7`).
    AtClose,
}

impl TimeInForce {
    /// Parse from the tag 59 value.
    #[must_use]
    pub const fn from_fix(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::Day),
            '1' => Some(Self::Gtc),
            '2' => Some(Self::Opg),
            '3' => Some(Self::Ioc),
            '4' => Some(Self::Fok),
            '5' => Some(Self::Gtx),
            '6' => Some(Self::Gtd),
            '7' => Some(Self::AtClose),
            _ => None,
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "DAY"),
            Self::Gtc => write!(f, "GTC"),
            Self::Opg => write!(f, "OPG"),
            Self::Ioc => write!(f, "IOC"),
            Self::Fok => write!(f, "FOK"),
            Self::Gtx => write!(f, "GTX"),
            Self::Gtd => write!(f, "GTD"),
            Self::AtClose => write!(f, "AT_CLOSE"),
        }
    }
}
