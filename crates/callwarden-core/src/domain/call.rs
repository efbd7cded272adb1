use crate::domain::verdict::{BlockReason, Verdict};
use serde::{Deserialize, Serialize};

/// One screened call as persisted in the call log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenedCall {
    pub id: i64,
    /// Raw number as delivered by the platform; `None` for hidden callers.
    pub number: Option<String>,
    pub verdict: Verdict,
    pub reason: Option<BlockReason>,
    pub at: i64,
}
