use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The screening decision for a single incoming call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allow,
    Block,
}

impl Verdict {
    /// Lowercase form used in JSON output and the call log.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::Block => "block",
        }
    }

    /// Uppercase label for human-readable log output.
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Block => "BLOCK",
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "allow" => Ok(Verdict::Allow),
            "block" => Ok(Verdict::Block),
            other => Err(format!("unknown verdict: {other}")),
        }
    }
}

/// Why a call was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The caller withheld their number.
    HiddenCaller,
    /// The number did not match any contact.
    NotInContacts,
}

impl BlockReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockReason::HiddenCaller => "hidden_caller",
            BlockReason::NotInContacts => "not_in_contacts",
        }
    }
}

impl FromStr for BlockReason {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "hidden_caller" => Ok(BlockReason::HiddenCaller),
            "not_in_contacts" => Ok(BlockReason::NotInContacts),
            other => Err(format!("unknown block reason: {other}")),
        }
    }
}
