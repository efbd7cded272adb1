pub mod domain;
pub mod error;
pub mod platform;
pub mod rules;
pub mod screen;

pub use domain::*;
pub use error::CoreError;
pub use platform::{
    BlockedCallCounter, CallActions, Capability, CapabilityProbe, ContactDirectory,
    NumberComparer, PlatformError, ProtectionSettings,
};
pub use rules::*;
pub use screen::{ActivationGate, CallScreener, Decision, ScreenOutcome, ScreeningEngine};
