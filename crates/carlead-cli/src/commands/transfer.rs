use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{default_export_filename, now_utc};
use anyhow::{Context as _, Result};
use carlead_store::ImportOutcome;
use clap::Args;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// File to write; a directory gets `carlead-contacts-YYYY-MM-DD.json`.
    /// Without it the array goes to stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,
}

pub fn export_contacts(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    let encoded = ctx.store.export_json().with_context(|| "encode contacts")?;
    let count = ctx.store.contacts().len();

    let Some(out) = args.out else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(encoded.as_bytes())?;
        writeln!(stdout)?;
        return Ok(());
    };

    let path = if out.is_dir() {
        out.join(default_export_filename(now_utc()))
    } else {
        out
    };
    fs::write(&path, format!("{encoded}\n"))
        .with_context(|| format!("write export {}", path.display()))?;
    debug!(path = %path.display(), count, "contacts exported");

    if ctx.json {
        print_json(&serde_json::json!({ "path": path, "count": count }))?;
    } else {
        println!("exported {} contacts to {}", count, path.display());
    }
    Ok(())
}

pub fn import_contacts(ctx: &mut Context<'_>, args: ImportArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)
        .with_context(|| format!("read import {}", args.file.display()))?;

    match ctx.store.import_json(&raw) {
        ImportOutcome::Replaced(count) => {
            if ctx.json {
                print_json(&serde_json::json!({ "imported": count }))?;
            } else {
                println!("imported {} contacts", count);
            }
            Ok(())
        }
        ImportOutcome::Ignored => Err(invalid_input(format!(
            "{} is not a JSON array of contacts; nothing imported",
            args.file.display()
        ))),
    }
}
