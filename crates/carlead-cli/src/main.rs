mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{
    completions, contacts, interactions, reference, schedule, transfer, Context,
};
use crate::error::{exit_code_for, report_error};
use carlead_config as config;
use carlead_store::{paths, RecordStore, SqliteSlot};

#[derive(Debug, Parser)]
#[command(name = "carlead", version, about = "carlead CLI")]
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
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Add a contact
    Add(contacts::AddContactArgs),
    /// Change fields of a contact
    Edit(contacts::EditContactArgs),
    Show(contacts::ShowArgs),
    /// List contacts, soonest follow-up first
    List(contacts::ListArgs),
    /// Overdue, today and upcoming follow-ups
    Agenda,
    Delete(contacts::DeleteArgs),
    /// Record a call, SMS, email or note
    Log(interactions::LogArgs),
    /// Set or clear the next follow-up date
    Schedule(schedule::ScheduleArgs),
    /// Write all contacts as a JSON array
    Export(transfer::ExportArgs),
    /// Replace all contacts from a JSON array
    Import(transfer::ImportArgs),
    /// Pipeline statuses
    Statuses,
    /// Brands, models and trims
    Taxonomy(reference::TaxonomyArgs),
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

    if let Command::Completions(args) = command {
        return completions::emit(args);
    }

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

    match command {
        Command::Statuses => return reference::list_statuses(json),
        Command::Taxonomy(args) => return reference::show_taxonomy(&app_config, json, args),
        _ => {}
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    if verbose {
        debug!(path = %db_path.display(), "database path resolved");
    }

    let slot = SqliteSlot::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;
    slot.migrate().with_context(|| "run migrations")?;

    let mut ctx = Context {
        store: RecordStore::load(&slot, app_config.storage_key.as_str()),
        json,
        config: &app_config,
    };

    match command {
        Command::Add(args) => contacts::add_contact(&mut ctx, args),
        Command::Edit(args) => contacts::edit_contact(&mut ctx, args),
        Command::Show(args) => contacts::show_contact(&ctx, args),
        Command::List(args) => contacts::list_contacts(&ctx, args),
        Command::Agenda => contacts::agenda(&ctx),
        Command::Delete(args) => contacts::delete_contact(&mut ctx, args),
        Command::Log(args) => interactions::log_interaction(&mut ctx, args),
        Command::Schedule(args) => schedule::schedule_contact(&mut ctx, args),
        Command::Export(args) => transfer::export_contacts(&ctx, args),
        Command::Import(args) => transfer::import_contacts(&mut ctx, args),
        Command::Completions(_) | Command::Statuses | Command::Taxonomy(_) => {
            unreachable!("handled before the store is opened")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
