use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{
    format_datetime, now_utc, parse_contact_id, parse_datetime_arg, parse_interaction_kind,
    parse_status,
};
use anyhow::Result;
use carlead_core::domain::SUGGESTED_OUTCOMES;
use carlead_core::rules::InteractionEntry;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    pub id: String,
    /// call | sms | email | note
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
    /// When it happened; defaults to now
    #[arg(long)]
    pub when: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    /// noreply, callback, booked, offer, closed_won, closed_lost or any text
    #[arg(long)]
    pub outcome: Option<String>,
    /// Move the contact to this status
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, conflicts_with = "clear_next")]
    pub next: Option<String>,
    #[arg(long)]
    pub clear_next: bool,
}

pub fn log_interaction(ctx: &mut Context<'_>, args: LogArgs) -> Result<()> {
    let now = now_utc();
    let contact_id = parse_contact_id(&args.id)?;

    let mut entry = InteractionEntry {
        note: args.note,
        outcome: args.outcome.map(|outcome| outcome.trim().to_string()),
        ..Default::default()
    };
    if let Some(raw) = args.kind.as_deref() {
        entry.kind = Some(parse_interaction_kind(raw)?);
    }
    if let Some(raw) = args.when.as_deref() {
        entry.date = Some(parse_datetime_arg(raw, "--when")?);
    }
    if let Some(raw) = args.status.as_deref() {
        entry.status = Some(parse_status(raw)?);
    }
    if let Some(raw) = args.next.as_deref() {
        entry.next_date = Some(Some(parse_datetime_arg(raw, "--next")?));
    }
    if args.clear_next {
        entry.next_date = Some(None);
    }

    let interaction = ctx
        .store
        .log_interaction(now, &contact_id, entry)
        .ok_or_else(|| not_found("contact not found"))?;

    if ctx.json {
        print_json(&interaction)?;
    } else {
        let outcome = outcome_label(&interaction.outcome)
            .map(|label| format!(" ({})", label))
            .unwrap_or_default();
        println!(
            "logged {} for {} at {}{}",
            interaction.kind.label(),
            contact_id,
            format_datetime(interaction.date),
            outcome
        );
    }
    Ok(())
}

fn outcome_label(outcome: &str) -> Option<&str> {
    if outcome.is_empty() {
        return None;
    }
    SUGGESTED_OUTCOMES
        .iter()
        .find(|(value, _)| *value == outcome)
        .map(|(_, label)| *label)
        .or(Some(outcome))
}
