use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical digit-only form of a phone number, produced by
/// [`DialPlan::normalize`](crate::rules::DialPlan::normalize).
///
/// The empty string is a valid value; it never matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    /// Wraps an already-canonical digit string. Callers outside the
    /// normalization path should go through `DialPlan::normalize` instead.
    pub(crate) fn from_canonical(digits: String) -> Self {
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Trailing `n` digits, or the whole string when shorter than `n`.
    pub fn suffix(&self, n: usize) -> &str {
        let start = self.0.len().saturating_sub(n);
        &self.0[start..]
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
