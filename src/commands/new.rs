use anyhow::Result;
use chrono::{NaiveDate, Utc};
use owo_colors::OwoColorize;
use slotbook_core::config::SlotbookConfig;
use slotbook_core::day_key;
use slotbook_core::store::RemoteStore;
use slotbook_core::time_window::Boundary;
use slotbook_core::{EventDraft, Schedule};

use super::parse_slot;
use crate::render;

pub struct NewArgs {
    pub name: String,
    pub day: Option<String>,
    pub start: String,
    pub end: String,
    pub color: Option<String>,
    pub note: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn run<S: RemoteStore>(
    schedule: &mut Schedule<S>,
    config: &SlotbookConfig,
    args: NewArgs,
    today: NaiveDate,
) -> Result<()> {
    let draft = build_draft(args, today, &config.default_color)?;
    let (id, date) = schedule.create(&draft, &config.user, Utc::now()).await?;

    if let Some(event) = schedule.index().get(&id, date) {
        println!(
            "{}",
            format!(
                "  Created: {} on {} {}",
                event.name,
                date.format("%Y/%m/%d"),
                render::time_range(event)
            )
            .green()
        );
    }
    println!("  {}", id.dimmed());

    Ok(())
}

/// Turn command-line arguments into a draft. Validation happens when the
/// draft is stored.
fn build_draft(args: NewArgs, today: NaiveDate, default_color: &str) -> Result<EventDraft> {
    let day = args
        .day
        .as_deref()
        .map_or(today, |path| day_key::initial_date_from_path(path, today));

    let mut draft = EventDraft::new(args.name, day).slots(
        parse_slot(&args.start, Boundary::Start)?,
        parse_slot(&args.end, Boundary::End)?,
    );
    draft.color = args.color.unwrap_or_else(|| default_color.to_string());
    draft.note = args.note.unwrap_or_default();
    draft.email = args.email.unwrap_or_default();
    draft.phone = args.phone.unwrap_or_default();

    Ok(draft)
}
