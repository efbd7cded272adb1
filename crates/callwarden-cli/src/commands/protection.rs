use crate::commands::{print_json, Context};
use crate::platform::StoreProbe;
use anyhow::Result;
use callwarden_core::screen::ActivationGate;
use callwarden_store::repo::PROTECTION_ENABLED;
use clap::Subcommand;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum ProtectionCommand {
    /// Turn the user protection flag on
    Enable,
    /// Turn the user protection flag off
    Disable,
    /// Show the flag and the full gate evaluation
    Status,
}

#[derive(Debug, Serialize)]
struct ProtectionReport {
    enabled: bool,
    active: bool,
}

pub fn enable(ctx: &Context<'_>) -> Result<()> {
    ctx.store.settings().set_bool(PROTECTION_ENABLED, true)?;
    status(ctx)
}

pub fn disable(ctx: &Context<'_>) -> Result<()> {
    ctx.store.settings().set_bool(PROTECTION_ENABLED, false)?;
    status(ctx)
}

pub fn status(ctx: &Context<'_>) -> Result<()> {
    let settings = ctx.store.settings();
    let enabled = settings.get_bool(PROTECTION_ENABLED, false)?;
    let probe = StoreProbe::new(ctx.store);
    let active = ActivationGate::new(&settings, &probe).is_protection_active();

    if ctx.json {
        return print_json(&ProtectionReport { enabled, active });
    }
    println!("enabled: {enabled}");
    println!("active: {active}");
    if enabled && !active {
        println!("note: protection is enabled but gated off; check grants");
    }
    Ok(())
}
