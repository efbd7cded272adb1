//! The activation gate and the screening engine.
//!
//! Two failure policies coexist on purpose: the gate fails CLOSED (any
//! uncertainty about the user flag, permissions or role reads as "not
//! active"), while the engine's contact lookup fails OPEN (no contact data
//! means the call is allowed, because blocking a known caller over a
//! transient read failure is worse than missing one block).

use crate::domain::{BlockReason, Verdict};
use crate::platform::{
    BlockedCallCounter, CallActions, Capability, CapabilityProbe, ContactDirectory,
    NumberComparer, ProtectionSettings,
};
use crate::rules::{numbers_match, DialPlan};
use tracing::{debug, info, warn};

/// Whether the blocking logic is allowed to run at all: the persisted user
/// flag plus live platform capability state, re-read on every evaluation.
pub struct ActivationGate<'a> {
    settings: &'a dyn ProtectionSettings,
    probe: &'a dyn CapabilityProbe,
}

impl<'a> ActivationGate<'a> {
    pub fn new(settings: &'a dyn ProtectionSettings, probe: &'a dyn CapabilityProbe) -> Self {
        Self { settings, probe }
    }

    /// Conjunctive short-circuit evaluation, cheapest check first.
    /// Read-only; any port error reads as "not active".
    pub fn is_protection_active(&self) -> bool {
        if !closed(self.settings.protection_enabled(), "protection flag") {
            debug!("protection not active: user flag off");
            return false;
        }

        for capability in [Capability::ReadContacts, Capability::AnswerCalls] {
            if !closed(self.probe.is_granted(capability), capability.as_str()) {
                debug!(capability = capability.as_str(), "protection not active: missing permission");
                return false;
            }
        }

        if self.probe.screening_role_required() {
            if closed(self.probe.holds_screening_role(), "screening role") {
                return true;
            }
            let default_handler =
                closed(self.probe.is_default_call_handler(), "default call handler");
            if !default_handler {
                debug!("protection not active: no screening role and not default handler");
            }
            return default_handler;
        }

        true
    }
}

/// Fail-closed read of a gate input.
fn closed(result: crate::platform::Result<bool>, what: &str) -> bool {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, check = what, "gate check failed, treating protection as inactive");
            false
        }
    }
}

/// The engine's answer for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub reason: Option<BlockReason>,
}

impl Decision {
    fn allow() -> Self {
        Self {
            verdict: Verdict::Allow,
            reason: None,
        }
    }

    fn block(reason: BlockReason) -> Self {
        Self {
            verdict: Verdict::Block,
            reason: Some(reason),
        }
    }
}

/// Pure decision procedure: contact membership under normalization.
pub struct ScreeningEngine<'a> {
    contacts: &'a dyn ContactDirectory,
    plan: &'a DialPlan,
    comparer: &'a dyn NumberComparer,
}

impl<'a> ScreeningEngine<'a> {
    pub fn new(
        contacts: &'a dyn ContactDirectory,
        plan: &'a DialPlan,
        comparer: &'a dyn NumberComparer,
    ) -> Self {
        Self {
            contacts,
            plan,
            comparer,
        }
    }

    /// Decides ALLOW or BLOCK for a raw caller identifier. Hidden callers
    /// (absent or blank) are always blocked. An unreadable or empty contact
    /// directory allows the call.
    pub fn decide(&self, raw: Option<&str>) -> Decision {
        let raw = match raw {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                info!("hidden caller, blocking");
                return Decision::block(BlockReason::HiddenCaller);
            }
        };

        let input = self.plan.normalize(raw);

        let numbers = match self.contacts.contact_numbers() {
            Ok(numbers) => numbers,
            Err(err) => {
                warn!(error = %err, "contact lookup failed, allowing call");
                return Decision::allow();
            }
        };
        if numbers.is_empty() {
            debug!("contact directory empty, allowing call");
            return Decision::allow();
        }

        for number in &numbers {
            let contact = self.plan.normalize(number);
            if numbers_match(&input, &contact, self.plan, self.comparer) {
                debug!(contact = %contact, "caller matched contact, allowing");
                return Decision::allow();
            }
        }

        Decision::block(BlockReason::NotInContacts)
    }
}

/// Outcome of screening one incoming call end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenOutcome {
    /// Whether the gate let the blocking logic run. When false the
    /// platform's default policy applies, which is ALLOW.
    pub active: bool,
    pub verdict: Verdict,
    pub reason: Option<BlockReason>,
    /// Whether the reject action was carried out.
    pub rejected: bool,
    /// Whether the blocked-call counter was incremented.
    pub counted: bool,
}

impl ScreenOutcome {
    fn inactive() -> Self {
        Self {
            active: false,
            verdict: Verdict::Allow,
            reason: None,
            rejected: false,
            counted: false,
        }
    }

    fn allowed() -> Self {
        Self {
            active: true,
            ..Self::inactive()
        }
    }
}

/// Full screening flow: gate, decision, reject action, counter.
pub struct CallScreener<'a> {
    gate: ActivationGate<'a>,
    engine: ScreeningEngine<'a>,
    actions: &'a dyn CallActions,
    counter: &'a dyn BlockedCallCounter,
}

impl<'a> CallScreener<'a> {
    pub fn new(
        gate: ActivationGate<'a>,
        engine: ScreeningEngine<'a>,
        actions: &'a dyn CallActions,
        counter: &'a dyn BlockedCallCounter,
    ) -> Self {
        Self {
            gate,
            engine,
            actions,
            counter,
        }
    }

    /// Screens one call. The counter increments exactly once per block,
    /// and only when the reject action was successfully carried out; a
    /// failed reject keeps the BLOCK verdict but does not count. Side
    /// effect failures are logged, never retried.
    pub fn screen(&self, raw: Option<&str>) -> ScreenOutcome {
        if !self.gate.is_protection_active() {
            debug!("protection inactive, platform default applies");
            return ScreenOutcome::inactive();
        }

        let decision = self.engine.decide(raw);
        if decision.verdict == Verdict::Allow {
            return ScreenOutcome::allowed();
        }

        let rejected = match self.actions.reject_call() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "reject action failed, verdict stands");
                false
            }
        };

        let counted = rejected
            && match self.counter.increment() {
                Ok(total) => {
                    info!(total, "blocked call recorded");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "failed to record blocked call");
                    false
                }
            };

        ScreenOutcome {
            active: true,
            verdict: Verdict::Block,
            reason: decision.reason,
            rejected,
            counted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivationGate, CallScreener, ScreeningEngine};
    use crate::domain::{BlockReason, Verdict};
    use crate::platform::{
        BlockedCallCounter, CallActions, Capability, CapabilityProbe, ContactDirectory,
        PlatformError, ProtectionSettings, Result,
    };
    use crate::rules::{DialPlan, LenientComparer};
    use std::cell::Cell;

    struct FakeSettings {
        enabled: Result<bool>,
    }

    impl FakeSettings {
        fn on() -> Self {
            Self { enabled: Ok(true) }
        }

        fn off() -> Self {
            Self { enabled: Ok(false) }
        }

        fn broken() -> Self {
            Self {
                enabled: Err(PlatformError::Unavailable("settings".to_string())),
            }
        }
    }

    impl ProtectionSettings for FakeSettings {
        fn protection_enabled(&self) -> Result<bool> {
            match &self.enabled {
                Ok(value) => Ok(*value),
                Err(_) => Err(PlatformError::Unavailable("settings".to_string())),
            }
        }
    }

    struct FakeProbe {
        read_contacts: bool,
        answer_calls: bool,
        role_required: bool,
        holds_role: bool,
        default_handler: bool,
        role_errors: bool,
    }

    impl FakeProbe {
        fn all_granted() -> Self {
            Self {
                read_contacts: true,
                answer_calls: true,
                role_required: true,
                holds_role: true,
                default_handler: false,
                role_errors: false,
            }
        }
    }

    impl CapabilityProbe for FakeProbe {
        fn is_granted(&self, capability: Capability) -> Result<bool> {
            Ok(match capability {
                Capability::ReadContacts => self.read_contacts,
                Capability::AnswerCalls => self.answer_calls,
            })
        }

        fn screening_role_required(&self) -> bool {
            self.role_required
        }

        fn holds_screening_role(&self) -> Result<bool> {
            if self.role_errors {
                return Err(PlatformError::Unavailable("role manager".to_string()));
            }
            Ok(self.holds_role)
        }

        fn is_default_call_handler(&self) -> Result<bool> {
            Ok(self.default_handler)
        }
    }

    struct FakeContacts {
        numbers: Option<Vec<String>>,
    }

    impl FakeContacts {
        fn with(numbers: &[&str]) -> Self {
            Self {
                numbers: Some(numbers.iter().map(|n| n.to_string()).collect()),
            }
        }

        fn failing() -> Self {
            Self { numbers: None }
        }
    }

    impl ContactDirectory for FakeContacts {
        fn contact_numbers(&self) -> Result<Vec<String>> {
            match &self.numbers {
                Some(numbers) => Ok(numbers.clone()),
                None => Err(PlatformError::PermissionDenied("contacts".to_string())),
            }
        }
    }

    struct FakeActions {
        fail: bool,
        calls: Cell<u32>,
    }

    impl FakeActions {
        fn working() -> Self {
            Self {
                fail: false,
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: Cell::new(0),
            }
        }
    }

    impl CallActions for FakeActions {
        fn reject_call(&self) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(PlatformError::ActionFailed("end call".to_string()));
            }
            Ok(())
        }
    }

    struct FakeCounter {
        value: Cell<i64>,
    }

    impl FakeCounter {
        fn new() -> Self {
            Self {
                value: Cell::new(0),
            }
        }
    }

    impl BlockedCallCounter for FakeCounter {
        fn increment(&self) -> Result<i64> {
            self.value.set(self.value.get() + 1);
            Ok(self.value.get())
        }

        fn read(&self) -> Result<i64> {
            Ok(self.value.get())
        }
    }

    #[test]
    fn gate_requires_user_flag_first() {
        let settings = FakeSettings::off();
        let probe = FakeProbe::all_granted();
        let gate = ActivationGate::new(&settings, &probe);
        assert!(!gate.is_protection_active());
    }

    #[test]
    fn gate_requires_all_permissions() {
        let settings = FakeSettings::on();
        let probe = FakeProbe {
            answer_calls: false,
            ..FakeProbe::all_granted()
        };
        let gate = ActivationGate::new(&settings, &probe);
        assert!(!gate.is_protection_active());
    }

    #[test]
    fn gate_accepts_role_or_default_handler() {
        let settings = FakeSettings::on();

        let probe = FakeProbe::all_granted();
        assert!(ActivationGate::new(&settings, &probe).is_protection_active());

        let probe = FakeProbe {
            holds_role: false,
            default_handler: true,
            ..FakeProbe::all_granted()
        };
        assert!(ActivationGate::new(&settings, &probe).is_protection_active());

        let probe = FakeProbe {
            holds_role: false,
            default_handler: false,
            ..FakeProbe::all_granted()
        };
        assert!(!ActivationGate::new(&settings, &probe).is_protection_active());
    }

    #[test]
    fn gate_skips_role_when_not_required() {
        let settings = FakeSettings::on();
        let probe = FakeProbe {
            role_required: false,
            holds_role: false,
            default_handler: false,
            ..FakeProbe::all_granted()
        };
        assert!(ActivationGate::new(&settings, &probe).is_protection_active());
    }

    #[test]
    fn gate_fails_closed_on_errors() {
        let settings = FakeSettings::broken();
        let probe = FakeProbe::all_granted();
        assert!(!ActivationGate::new(&settings, &probe).is_protection_active());

        let settings = FakeSettings::on();
        let probe = FakeProbe {
            holds_role: false,
            role_errors: true,
            default_handler: false,
            ..FakeProbe::all_granted()
        };
        assert!(!ActivationGate::new(&settings, &probe).is_protection_active());
    }

    fn engine<'a>(
        contacts: &'a FakeContacts,
        plan: &'a DialPlan,
        comparer: &'a LenientComparer,
    ) -> ScreeningEngine<'a> {
        ScreeningEngine::new(contacts, plan, comparer)
    }

    #[test]
    fn hidden_caller_is_blocked() {
        let contacts = FakeContacts::with(&["11912345678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let engine = engine(&contacts, &plan, &comparer);

        for raw in [None, Some(""), Some("   ")] {
            let decision = engine.decide(raw);
            assert_eq!(decision.verdict, Verdict::Block);
            assert_eq!(decision.reason, Some(BlockReason::HiddenCaller));
        }
    }

    #[test]
    fn known_contact_is_allowed() {
        let contacts = FakeContacts::with(&["+55 (11) 91234-5678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let engine = engine(&contacts, &plan, &comparer);

        let decision = engine.decide(Some("11912345678"));
        assert_eq!(decision.verdict, Verdict::Allow);
        assert_eq!(decision.reason, None);
    }

    #[test]
    fn unknown_number_is_blocked() {
        let contacts = FakeContacts::with(&["11912345678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let engine = engine(&contacts, &plan, &comparer);

        let decision = engine.decide(Some("21987654321"));
        assert_eq!(decision.verdict, Verdict::Block);
        assert_eq!(decision.reason, Some(BlockReason::NotInContacts));
    }

    #[test]
    fn contact_lookup_failure_fails_open() {
        let contacts = FakeContacts::failing();
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let engine = engine(&contacts, &plan, &comparer);

        let decision = engine.decide(Some("21987654321"));
        assert_eq!(decision.verdict, Verdict::Allow);
    }

    #[test]
    fn empty_contact_directory_fails_open() {
        let contacts = FakeContacts::with(&[]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let engine = engine(&contacts, &plan, &comparer);

        let decision = engine.decide(Some("21987654321"));
        assert_eq!(decision.verdict, Verdict::Allow);
    }

    #[test]
    fn screen_blocks_and_counts_once() {
        let settings = FakeSettings::on();
        let probe = FakeProbe::all_granted();
        let contacts = FakeContacts::with(&["11912345678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let actions = FakeActions::working();
        let counter = FakeCounter::new();

        let screener = CallScreener::new(
            ActivationGate::new(&settings, &probe),
            ScreeningEngine::new(&contacts, &plan, &comparer),
            &actions,
            &counter,
        );

        let outcome = screener.screen(Some("21987654321"));
        assert!(outcome.active);
        assert_eq!(outcome.verdict, Verdict::Block);
        assert!(outcome.rejected);
        assert!(outcome.counted);
        assert_eq!(actions.calls.get(), 1);
        assert_eq!(counter.value.get(), 1);
    }

    #[test]
    fn screen_allow_has_no_side_effects() {
        let settings = FakeSettings::on();
        let probe = FakeProbe::all_granted();
        let contacts = FakeContacts::with(&["11912345678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let actions = FakeActions::working();
        let counter = FakeCounter::new();

        let screener = CallScreener::new(
            ActivationGate::new(&settings, &probe),
            ScreeningEngine::new(&contacts, &plan, &comparer),
            &actions,
            &counter,
        );

        let outcome = screener.screen(Some("11912345678"));
        assert!(outcome.active);
        assert_eq!(outcome.verdict, Verdict::Allow);
        assert_eq!(actions.calls.get(), 0);
        assert_eq!(counter.value.get(), 0);
    }

    #[test]
    fn failed_reject_keeps_verdict_but_does_not_count() {
        let settings = FakeSettings::on();
        let probe = FakeProbe::all_granted();
        let contacts = FakeContacts::with(&["11912345678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let actions = FakeActions::failing();
        let counter = FakeCounter::new();

        let screener = CallScreener::new(
            ActivationGate::new(&settings, &probe),
            ScreeningEngine::new(&contacts, &plan, &comparer),
            &actions,
            &counter,
        );

        let outcome = screener.screen(Some("21987654321"));
        assert_eq!(outcome.verdict, Verdict::Block);
        assert!(!outcome.rejected);
        assert!(!outcome.counted);
        assert_eq!(counter.value.get(), 0);
    }

    #[test]
    fn inactive_gate_skips_engine_entirely() {
        let settings = FakeSettings::off();
        let probe = FakeProbe::all_granted();
        let contacts = FakeContacts::with(&["11912345678"]);
        let plan = DialPlan::default();
        let comparer = LenientComparer::default();
        let actions = FakeActions::working();
        let counter = FakeCounter::new();

        let screener = CallScreener::new(
            ActivationGate::new(&settings, &probe),
            ScreeningEngine::new(&contacts, &plan, &comparer),
            &actions,
            &counter,
        );

        // Even a hidden caller passes through when protection is off.
        let outcome = screener.screen(None);
        assert!(!outcome.active);
        assert_eq!(outcome.verdict, Verdict::Allow);
        assert_eq!(actions.calls.get(), 0);
        assert_eq!(counter.value.get(), 0);
    }
}
