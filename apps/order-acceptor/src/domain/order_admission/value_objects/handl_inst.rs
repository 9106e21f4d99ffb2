//! Handling instruction (FIX tag 21).

use serde::{Deserialize, Serialize};

/// Handling instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandlInst {
    /// Automated execution, private, no broker intervention (`1`).
    AutomatedPrivate,
    /// Automated execution, public, broker intervention OK (`2`).
    AutomatedPublic,
    /// Manual order, best execution (`3`).
    Manual,
}

impl HandlInst {
    /// Parse from the tag 21 value.
    #[must_use]
    pub const fn from_fix(code: char) -> Option<Self> {
        match code {
            '1' => Some(Self::AutomatedPrivate),
            '2' => Some(Self::AutomatedPublic),
            '3' => Some(Self::Manual),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handl_inst_codes() {
        assert_eq!(HandlInst::from_fix('2'), Some(HandlInst::AutomatedPublic));
        assert_eq!(HandlInst::from_fix('3'), Some(HandlInst::Manual));
        assert_eq!(HandlInst::from_fix('4'), None);
    }
}
