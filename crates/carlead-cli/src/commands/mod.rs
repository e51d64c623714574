use anyhow::Result;
use carlead_config::AppConfig;
use carlead_store::{RecordStore, SqliteSlot};
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod contacts;
pub mod interactions;
pub mod reference;
pub mod schedule;
pub mod transfer;

pub struct Context<'a> {
    pub store: RecordStore<&'a SqliteSlot>,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
