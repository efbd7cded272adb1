use crate::commands::{print_json, Context};
use anyhow::Result;
use callwarden_store::repo::BLOCKED_CALLS;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct StatsArgs {}

#[derive(Debug, Serialize)]
struct StatsReport {
    blocked_calls: i64,
    contacts: i64,
}

pub fn stats(ctx: &Context<'_>, _args: StatsArgs) -> Result<()> {
    let blocked_calls = ctx.store.counters().read(BLOCKED_CALLS)?;
    let contacts = ctx.store.contacts().count()?;

    if ctx.json {
        return print_json(&StatsReport {
            blocked_calls,
            contacts,
        });
    }
    println!("blocked calls: {blocked_calls}");
    println!("contacts: {contacts}");
    Ok(())
}
