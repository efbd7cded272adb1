use crate::commands::{print_json, Context, DEFAULT_LOG_LIMIT};
use crate::util::format_timestamp;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
    pub limit: i64,
}

pub fn recent(ctx: &Context<'_>, args: LogArgs) -> Result<()> {
    let calls = ctx.store.call_log().recent(args.limit)?;

    if ctx.json {
        return print_json(&calls);
    }

    for call in calls {
        let caller = call.number.as_deref().unwrap_or("<hidden>");
        let reason = call
            .reason
            .map(|r| format!(" ({})", r.as_str()))
            .unwrap_or_default();
        println!(
            "{}  {}  {}{}",
            format_timestamp(call.at),
            call.verdict.label(),
            caller,
            reason
        );
    }
    Ok(())
}
