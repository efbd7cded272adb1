//! The CLI's thin platform adapter: capability grants live in the
//! settings table instead of an OS permission model, and the reject
//! action has no live call to tear down.

use callwarden_core::platform::{CallActions, Capability, CapabilityProbe, Result};
use callwarden_store::Store;
use tracing::info;

pub const SCREENING_ROLE: &str = "screening-role";
pub const DEFAULT_HANDLER: &str = "default-handler";

pub fn grant_key(name: &str) -> String {
    format!("grant.{name}")
}

/// Capability probe backed by persisted grants; everything defaults to
/// not granted, matching a freshly installed app.
pub struct StoreProbe<'a> {
    store: &'a Store,
}

impl<'a> StoreProbe<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    fn granted(&self, name: &str) -> Result<bool> {
        Ok(self.store.settings().get_bool(&grant_key(name), false)?)
    }
}

impl CapabilityProbe for StoreProbe<'_> {
    fn is_granted(&self, capability: Capability) -> Result<bool> {
        self.granted(capability.as_str())
    }

    fn screening_role_required(&self) -> bool {
        true
    }

    fn holds_screening_role(&self) -> Result<bool> {
        self.granted(SCREENING_ROLE)
    }

    fn is_default_call_handler(&self) -> Result<bool> {
        self.granted(DEFAULT_HANDLER)
    }
}

/// Reject action for the CLI harness.
pub struct LoggedReject;

impl CallActions for LoggedReject {
    fn reject_call(&self) -> Result<()> {
        info!("reject call");
        Ok(())
    }
}
