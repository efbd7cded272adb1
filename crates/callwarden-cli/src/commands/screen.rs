use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::platform::{LoggedReject, StoreProbe};
use crate::util::now_utc;
use anyhow::Result;
use callwarden_core::domain::{BlockReason, Verdict};
use callwarden_core::rules::LenientComparer;
use callwarden_core::screen::{ActivationGate, CallScreener, ScreeningEngine};
use callwarden_store::repo::ScreenedCallNew;
use clap::{ArgAction, Args};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Caller number as delivered by the platform
    pub number: Option<String>,
    /// Screen a hidden/private caller (no number)
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "number")]
    pub hidden: bool,
}

#[derive(Debug, Serialize)]
struct ScreenReport {
    active: bool,
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<BlockReason>,
    rejected: bool,
    counted: bool,
}

pub fn screen_call(ctx: &Context<'_>, args: ScreenArgs) -> Result<()> {
    if args.number.is_none() && !args.hidden {
        return Err(invalid_input("provide a caller NUMBER or --hidden"));
    }
    let raw = args.number.as_deref();

    let settings = ctx.store.settings();
    let probe = StoreProbe::new(ctx.store);
    let contacts = ctx.store.contacts();
    let counters = ctx.store.counters();
    let actions = LoggedReject;
    let comparer = LenientComparer::default();
    let plan = &ctx.config.dial_plan;

    let screener = CallScreener::new(
        ActivationGate::new(&settings, &probe),
        ScreeningEngine::new(&contacts, plan, &comparer),
        &actions,
        &counters,
    );
    let outcome = screener.screen(raw);

    ctx.store.call_log().record(
        now_utc(),
        ScreenedCallNew {
            number: raw.map(str::to_string),
            verdict: outcome.verdict,
            reason: outcome.reason.map(|r| r.as_str().to_string()),
        },
    )?;

    if ctx.json {
        return print_json(&ScreenReport {
            active: outcome.active,
            verdict: outcome.verdict,
            reason: outcome.reason,
            rejected: outcome.rejected,
            counted: outcome.counted,
        });
    }

    let caller = raw.unwrap_or("<hidden>");
    if !outcome.active {
        println!("{} {} (protection inactive)", outcome.verdict.label(), caller);
        return Ok(());
    }
    match outcome.reason {
        Some(reason) => println!("{} {} ({})", outcome.verdict.label(), caller, reason.as_str()),
        None => println!("{} {}", outcome.verdict.label(), caller),
    }
    Ok(())
}
