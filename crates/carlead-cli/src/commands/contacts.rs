use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    date_class_label, format_datetime, format_millis, format_optional_date, non_blank, now_utc,
    parse_bucket, parse_contact_id, parse_datetime_arg, parse_status, parse_status_filter,
};
use anyhow::Result;
use carlead_core::domain::{Contact, VehicleSelection};
use carlead_core::dto::{AgendaDto, ContactListItemDto};
use carlead_core::rules::{ContactInput, ContactPatch, DateBucket, StatusFilter, ViewQuery};
use carlead_core::VehicleTaxonomy;
use chrono::{DateTime, Local, Utc};
use clap::Args;
use tracing::warn;

#[derive(Debug, Args)]
pub struct AddContactArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Free-text vehicle interest; derived from brand/model/trim when omitted
    #[arg(long)]
    pub car: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub trim: Option<String>,
    /// Additional brand of interest (repeatable)
    #[arg(long = "interest", value_name = "BRAND")]
    pub interests: Vec<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub next: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditContactArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub car: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub trim: Option<String>,
    #[arg(long = "interest", value_name = "BRAND")]
    pub interests: Vec<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, conflicts_with = "clear_next")]
    pub next: Option<String>,
    #[arg(long)]
    pub clear_next: bool,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against name, contact details, vehicle and notes
    #[arg(long, short)]
    pub query: Option<String>,
    /// A status value, or `all`
    #[arg(long)]
    pub status: Option<String>,
    /// today | overdue | upcoming | all
    #[arg(long)]
    pub bucket: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_contact(ctx: &mut Context<'_>, args: AddContactArgs) -> Result<()> {
    let now = now_utc();
    let next_date = match args.next.as_deref() {
        Some(raw) => Some(parse_datetime_arg(raw, "--next")?),
        None => None,
    };
    let status = match args.status.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    let selection = VehicleSelection::from_parts(
        args.brand.as_deref().unwrap_or_default(),
        args.model.as_deref().unwrap_or_default(),
        args.trim.as_deref().unwrap_or_default(),
    );
    warn_unknown_vehicle(&ctx.config.taxonomy, &selection);

    let input = ContactInput {
        name: args.name,
        phone: args.phone,
        email: args.email,
        car: non_blank(args.car),
        car_brand: args.brand,
        car_model: args.model,
        car_trim: args.trim,
        brands: brand_list(args.interests),
        source: args.source,
        status,
        next_date,
        notes: args.notes,
    };
    let contact = ctx.store.create(now, input);

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("created {} {}", contact.id, contact.display_name());
    }
    Ok(())
}

pub fn edit_contact(ctx: &mut Context<'_>, args: EditContactArgs) -> Result<()> {
    let now = now_utc();
    let id = parse_contact_id(&args.id)?;
    let existing = ctx
        .store
        .get(&id)
        .ok_or_else(|| not_found("contact not found"))?;

    let mut patch = ContactPatch {
        name: args.name.map(trim_owned),
        phone: args.phone.map(trim_owned),
        email: args.email.map(trim_owned),
        car: args.car.map(trim_owned),
        brands: brand_list(args.interests),
        source: args.source.map(trim_owned),
        notes: args.notes,
        ..Default::default()
    };
    if let Some(raw) = args.status.as_deref() {
        patch.status = Some(parse_status(raw)?);
    }
    if let Some(raw) = args.next.as_deref() {
        patch.next_date = Some(Some(parse_datetime_arg(raw, "--next")?));
    }
    if args.clear_next {
        patch.next_date = Some(None);
    }

    if args.brand.is_some() || args.model.is_some() || args.trim.is_some() {
        let mut selection = VehicleSelection::from_parts(
            &existing.car_brand,
            &existing.car_model,
            &existing.car_trim,
        );
        if let Some(brand) = args.brand.as_deref() {
            selection.set_brand(brand);
        }
        if let Some(model) = args.model.as_deref() {
            selection.set_model(model);
        }
        if let Some(trim) = args.trim.as_deref() {
            selection.set_trim(trim);
        }
        warn_unknown_vehicle(&ctx.config.taxonomy, &selection);
        patch.car_brand = Some(selection.brand().to_string());
        patch.car_model = Some(selection.model().to_string());
        patch.car_trim = Some(selection.trim().to_string());
    }

    if patch.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let contact = ctx
        .store
        .update(now, &id, patch)
        .ok_or_else(|| not_found("contact not found"))?;
    if ctx.json {
        print_json(contact)?;
    } else {
        println!("updated {} {}", contact.id, contact.display_name());
    }
    Ok(())
}

pub fn show_contact(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contact = ctx
        .store
        .get(&id)
        .ok_or_else(|| not_found("contact not found"))?;

    if ctx.json {
        print_json(contact)?;
        return Ok(());
    }

    print_contact(contact);
    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let status = match args.status.as_deref() {
        Some(raw) => parse_status_filter(raw)?,
        None => StatusFilter::All,
    };
    let bucket = match args.bucket.as_deref() {
        Some(raw) => parse_bucket(raw)?,
        None => ctx.config.default_bucket,
    };
    let query = ViewQuery {
        text: args.query.unwrap_or_default(),
        status,
        bucket,
    };

    let now = now_utc();
    let items = list_items(ctx, &query, now);

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no contacts");
        return Ok(());
    }
    for item in &items {
        print_list_item(item);
    }
    Ok(())
}

pub fn agenda(ctx: &Context<'_>) -> Result<()> {
    let now = now_utc();
    let section = |bucket: DateBucket| {
        let query = ViewQuery {
            bucket,
            ..Default::default()
        };
        list_items(ctx, &query, now)
    };
    let output = AgendaDto {
        overdue: section(DateBucket::Overdue),
        today: section(DateBucket::Today),
        upcoming: section(DateBucket::Upcoming),
    };

    if ctx.json {
        print_json(&output)?;
        return Ok(());
    }

    for (title, items) in [
        ("overdue", &output.overdue),
        ("today", &output.today),
        ("upcoming", &output.upcoming),
    ] {
        println!("{} ({})", title, items.len());
        for item in items {
            print!("  ");
            print_list_item(item);
        }
    }
    Ok(())
}

pub fn delete_contact(ctx: &mut Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let removed = ctx
        .store
        .remove(&id)
        .ok_or_else(|| not_found("contact not found"))?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": removed.id }))?;
    } else {
        println!("deleted {}", removed.id);
    }
    Ok(())
}

/// Calendar days follow the local time zone, DST included.
fn list_items(ctx: &Context<'_>, query: &ViewQuery, now: DateTime<Utc>) -> Vec<ContactListItemDto> {
    ctx.store
        .view(query, now, &Local)
        .into_iter()
        .map(|contact| ContactListItemDto::from_contact(contact, now, &Local))
        .collect()
}

fn print_list_item(item: &ContactListItemDto) {
    let name = if item.name.is_empty() {
        "(unnamed)"
    } else {
        item.name.as_str()
    };
    let vehicle = item
        .vehicle
        .as_deref()
        .map(|vehicle| format!("  {}", vehicle))
        .unwrap_or_default();
    println!(
        "{}  {}  [{}]  {} ({}){}",
        item.id,
        name,
        item.status.label(),
        format_optional_date(item.next_date),
        date_class_label(item.date_class),
        vehicle
    );
}

fn print_contact(contact: &Contact) {
    println!("id: {}", contact.id);
    println!("name: {}", contact.display_name());
    for (label, value) in [
        ("phone", &contact.phone),
        ("email", &contact.email),
        ("car", &contact.car),
        ("source", &contact.source),
    ] {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }
    if let Some(vehicle) = contact.vehicle_label() {
        println!("vehicle: {}", vehicle);
    }
    if !contact.brands.is_empty() {
        println!("brands: {}", contact.brands.join(", "));
    }
    println!("status: {}", contact.status.label());
    if let Some(next) = contact.next_date {
        println!("next: {}", format_datetime(next));
    }
    println!("created_at: {}", format_millis(contact.created_at));
    println!("updated_at: {}", format_millis(contact.updated_at));
    if !contact.notes.trim().is_empty() {
        println!("notes: {}", contact.notes);
    }

    if contact.interactions.is_empty() {
        println!("interactions: none");
        return;
    }
    println!("interactions:");
    for interaction in &contact.interactions {
        let note = if interaction.note.trim().is_empty() {
            "(no note)"
        } else {
            &interaction.note
        };
        let outcome = if interaction.outcome.is_empty() {
            String::new()
        } else {
            format!(" -> {}", interaction.outcome)
        };
        println!(
            "  {} [{}] {}{}",
            format_datetime(interaction.date),
            interaction.kind.label(),
            note,
            outcome
        );
    }
}

fn warn_unknown_vehicle(taxonomy: &VehicleTaxonomy, selection: &VehicleSelection) {
    if !taxonomy.contains(selection) {
        warn!(
            brand = selection.brand(),
            model = selection.model(),
            trim = selection.trim(),
            "vehicle not in taxonomy, stored as given"
        );
    }
}

fn brand_list(interests: Vec<String>) -> Option<Vec<String>> {
    let brands: Vec<String> = interests
        .into_iter()
        .map(trim_owned)
        .filter(|brand| !brand.is_empty())
        .collect();
    if brands.is_empty() {
        None
    } else {
        Some(brands)
    }
}

fn trim_owned(value: String) -> String {
    value.trim().to_string()
}
