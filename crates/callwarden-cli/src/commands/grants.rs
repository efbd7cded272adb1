use crate::commands::{print_json, Context};
use crate::platform::{grant_key, DEFAULT_HANDLER, SCREENING_ROLE};
use anyhow::Result;
use callwarden_core::platform::Capability;
use clap::Args;
use serde::Serialize;

/// The capabilities the activation gate checks, as CLI-manageable grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GrantName {
    ReadContacts,
    AnswerCalls,
    ScreeningRole,
    DefaultHandler,
}

impl GrantName {
    fn key_name(self) -> &'static str {
        match self {
            GrantName::ReadContacts => Capability::ReadContacts.as_str(),
            GrantName::AnswerCalls => Capability::AnswerCalls.as_str(),
            GrantName::ScreeningRole => SCREENING_ROLE,
            GrantName::DefaultHandler => DEFAULT_HANDLER,
        }
    }
}

#[derive(Debug, Args)]
pub struct GrantArgs {
    #[arg(value_enum)]
    pub capability: GrantName,
}

#[derive(Debug, Args)]
pub struct RevokeArgs {
    #[arg(value_enum)]
    pub capability: GrantName,
}

#[derive(Debug, Serialize)]
struct GrantReport {
    capability: String,
    granted: bool,
}

pub fn grant(ctx: &Context<'_>, args: GrantArgs) -> Result<()> {
    set(ctx, args.capability, true)
}

pub fn revoke(ctx: &Context<'_>, args: RevokeArgs) -> Result<()> {
    set(ctx, args.capability, false)
}

fn set(ctx: &Context<'_>, capability: GrantName, granted: bool) -> Result<()> {
    let name = capability.key_name();
    ctx.store.settings().set_bool(&grant_key(name), granted)?;

    if ctx.json {
        return print_json(&GrantReport {
            capability: name.to_string(),
            granted,
        });
    }
    println!("{name}: {}", if granted { "granted" } else { "revoked" });
    Ok(())
}
