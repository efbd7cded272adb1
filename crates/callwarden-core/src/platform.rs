//! Ports onto the host platform. The engine only ever talks to these
//! traits; the store and CLI provide concrete adapters, and the unit
//! tests provide fakes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("platform service unavailable: {0}")]
    Unavailable(String),
    #[error("platform action failed: {0}")]
    ActionFailed(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Capabilities the activation gate requires before any blocking happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ReadContacts,
    AnswerCalls,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ReadContacts => "read-contacts",
            Capability::AnswerCalls => "answer-calls",
        }
    }
}

/// The device address book. Queried fresh on every decision; nothing in
/// the core caches contact numbers across calls.
pub trait ContactDirectory {
    fn contact_numbers(&self) -> Result<Vec<String>>;
}

/// Live platform capability state. Must not be cached by implementations;
/// the gate re-reads it on every screening.
pub trait CapabilityProbe {
    fn is_granted(&self, capability: Capability) -> Result<bool>;

    /// Whether this platform gates call interception behind an explicit
    /// role or default-handler status.
    fn screening_role_required(&self) -> bool;

    fn holds_screening_role(&self) -> Result<bool>;

    fn is_default_call_handler(&self) -> Result<bool>;
}

/// The persisted "user enabled protection" flag.
pub trait ProtectionSettings {
    fn protection_enabled(&self) -> Result<bool>;
}

/// Outbound actions on the call being screened.
pub trait CallActions {
    fn reject_call(&self) -> Result<()>;
}

/// The persisted blocked-call counter. `increment` must be a single
/// atomic update, not a read-modify-write pair.
pub trait BlockedCallCounter {
    fn increment(&self) -> Result<i64>;
    fn read(&self) -> Result<i64>;
}

/// Region-aware "same phone number" comparison, the final matching tier.
/// Stands in for the host platform's comparison utility.
pub trait NumberComparer {
    fn are_same(&self, a: &str, b: &str, region: &str) -> Result<bool>;
}
