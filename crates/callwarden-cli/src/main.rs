mod commands;
mod error;
mod platform;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    backup, completions, contacts, grants, log, protection, screen, stats, Context,
};
use crate::error::{exit_code_for, report_error};
use callwarden_config as config;
use callwarden_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "callwarden", version, about = "callwarden CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Screen an incoming call and apply the verdict
    Screen(screen::ScreenArgs),
    #[command(subcommand)]
    Protection(protection::ProtectionCommand),
    /// Grant a simulated platform capability
    Grant(grants::GrantArgs),
    /// Revoke a simulated platform capability
    Revoke(grants::RevokeArgs),
    #[command(subcommand)]
    Contacts(contacts::ContactsCommand),
    /// Blocked-call counter and contact totals
    Stats(stats::StatsArgs),
    /// Recent screened calls
    Log(log::LogArgs),
    Backup(backup::BackupArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::Screen(args) => screen::screen_call(&ctx, args),
                Command::Protection(cmd) => match cmd {
                    protection::ProtectionCommand::Enable => protection::enable(&ctx),
                    protection::ProtectionCommand::Disable => protection::disable(&ctx),
                    protection::ProtectionCommand::Status => protection::status(&ctx),
                },
                Command::Grant(args) => grants::grant(&ctx, args),
                Command::Revoke(args) => grants::revoke(&ctx, args),
                Command::Contacts(cmd) => match cmd {
                    contacts::ContactsCommand::Add(args) => contacts::add(&ctx, args),
                    contacts::ContactsCommand::Rm(args) => contacts::remove(&ctx, args),
                    contacts::ContactsCommand::Ls => contacts::list(&ctx),
                },
                Command::Stats(args) => stats::stats(&ctx, args),
                Command::Log(args) => log::recent(&ctx, args),
                Command::Backup(args) => backup::backup(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
