//! Protocol message model.
//!
//! The session layer hands the acceptor already-decoded messages: a declared
//! [`MsgType`] plus header and body tag/value maps. Typed accessors turn
//! absent or malformed values into [`FieldError`]s instead of panics.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::FieldError;
use super::msg_type::MsgType;
use super::tags;

/// UTCTimestamp layout, fractional seconds optional.
const UTC_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H:%M:%S%.f";

/// Ordered tag → value map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<u32, String>);

impl FieldMap {
    /// Create an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any existing value.
    pub fn set(&mut self, tag: u32, value: impl Into<String>) -> &mut Self {
        self.0.insert(tag, value.into());
        self
    }

    /// Raw value, if present.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.0.get(&tag).map(String::as_str)
    }

    /// True if the tag is present with a non-empty value.
    #[must_use]
    pub fn is_set(&self, tag: u32) -> bool {
        self.get(tag).is_some_and(|v| !v.is_empty())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(tag, value)| (*tag, value.as_str()))
    }

    /// Required string value. Empty values count as missing.
    pub fn require(&self, tag: u32) -> Result<&str, FieldError> {
        match self.get(tag) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(FieldError::Missing { tag }),
        }
    }

    /// Required single-character value.
    pub fn require_char(&self, tag: u32) -> Result<char, FieldError> {
        let value = self.require(tag)?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(FieldError::Format {
                tag,
                value: value.to_string(),
            }),
        }
    }

    /// Optional single-character value.
    pub fn get_char(&self, tag: u32) -> Result<Option<char>, FieldError> {
        if self.is_set(tag) {
            self.require_char(tag).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Required decimal value (Qty, Price, Amt).
    pub fn require_decimal(&self, tag: u32) -> Result<Decimal, FieldError> {
        let value = self.require(tag)?;
        Decimal::from_str(value).map_err(|_| FieldError::Format {
            tag,
            value: value.to_string(),
        })
    }

    /// Optional decimal value; absent and empty both yield `None`.
    pub fn get_decimal(&self, tag: u32) -> Result<Option<Decimal>, FieldError> {
        if self.is_set(tag) {
            self.require_decimal(tag).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Optional unsigned integer value (SeqNum, int).
    pub fn get_u64(&self, tag: u32) -> Result<Option<u64>, FieldError> {
        match self.get(tag) {
            Some(value) if !value.is_empty() => {
                value.parse().map(Some).map_err(|_| FieldError::Format {
                    tag,
                    value: value.to_string(),
                })
            }
            _ => Ok(None),
        }
    }

    /// Required UTCTimestamp value (`YYYYMMDD-HH:MM:SS[.sss]`).
    pub fn require_timestamp(&self, tag: u32) -> Result<DateTime<Utc>, FieldError> {
        let value = self.require(tag)?;
        NaiveDateTime::parse_from_str(value, UTC_TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|_| FieldError::Format {
                tag,
                value: value.to_string(),
            })
    }
}

impl<const N: usize> From<[(u32, &str); N]> for FieldMap {
    fn from(fields: [(u32, &str); N]) -> Self {
        Self(
            fields
                .into_iter()
                .map(|(tag, value)| (tag, value.to_string()))
                .collect(),
        )
    }
}

/// Format a timestamp as a FIX UTCTimestamp with milliseconds.
#[must_use]
pub fn format_utc_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y%m%d-%H:%M:%S%.3f").to_string()
}

/// A decoded application or admin message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Declared message type (tag 35).
    pub msg_type: MsgType,
    /// Standard header fields.
    #[serde(default)]
    pub header: FieldMap,
    /// Body fields.
    #[serde(default)]
    pub body: FieldMap,
}

impl Message {
    /// Create an empty message of the given type.
    #[must_use]
    pub fn new(msg_type: MsgType) -> Self {
        Self {
            msg_type,
            header: FieldMap::new(),
            body: FieldMap::new(),
        }
    }

    /// Set a header field.
    #[must_use]
    pub fn with_header(mut self, tag: u32, value: impl Into<String>) -> Self {
        self.header.set(tag, value);
        self
    }

    /// Set a body field.
    #[must_use]
    pub fn with_field(mut self, tag: u32, value: impl Into<String>) -> Self {
        self.body.set(tag, value);
        self
    }

    /// MsgSeqNum from the header, if present and numeric.
    #[must_use]
    pub fn seq_num(&self) -> Option<u64> {
        self.header.get_u64(tags::MSG_SEQ_NUM).ok().flatten()
    }

    /// SenderCompID from the header, if present.
    #[must_use]
    pub fn sender_comp_id(&self) -> Option<&str> {
        self.header.get(tags::SENDER_COMP_ID)
    }
}
