use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{format_datetime, now_utc, parse_contact_id, parse_datetime_arg};
use anyhow::Result;
use carlead_core::rules::ContactPatch;
use carlead_core::time::NextDatePreset;
use clap::{ArgGroup, Args};

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("when").required(true).args(["at", "preset", "clear"])))]
pub struct ScheduleArgs {
    pub id: String,
    #[arg(long)]
    pub at: Option<String>,
    /// today | tomorrow | next-week
    #[arg(long)]
    pub preset: Option<String>,
    #[arg(long)]
    pub clear: bool,
}

pub fn schedule_contact(ctx: &mut Context<'_>, args: ScheduleArgs) -> Result<()> {
    let now = now_utc();
    let contact_id = parse_contact_id(&args.id)?;
    let next_date = match (args.at.as_deref(), args.preset.as_deref()) {
        (Some(raw), _) => Some(parse_datetime_arg(raw, "--at")?),
        (None, Some(raw)) => Some(raw.parse::<NextDatePreset>()?.resolve(now)),
        (None, None) => None,
    };

    let patch = ContactPatch {
        next_date: Some(next_date),
        ..Default::default()
    };
    let contact = ctx
        .store
        .update(now, &contact_id, patch)
        .ok_or_else(|| not_found("contact not found"))?;

    if ctx.json {
        print_json(contact)?;
    } else {
        match contact.next_date {
            Some(at) => println!("scheduled {} at {}", contact.id, format_datetime(at)),
            None => println!("cleared schedule for {}", contact.id),
        }
    }
    Ok(())
}
