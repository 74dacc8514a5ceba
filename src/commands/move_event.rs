use anyhow::Result;
use owo_colors::OwoColorize;
use slotbook_core::Schedule;
use slotbook_core::store::RemoteStore;
use slotbook_core::time_window::Boundary;

use super::{parse_day, parse_slot};
use crate::render;

pub async fn run<S: RemoteStore>(
    schedule: &mut Schedule<S>,
    id: &str,
    day: &str,
    to: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    let from = parse_day(day)?;
    let to = to.map(parse_day).transpose()?.unwrap_or(from);
    let start = start.map(|s| parse_slot(s, Boundary::Start)).transpose()?;
    let end = end.map(|s| parse_slot(s, Boundary::End)).transpose()?;

    let event = schedule.move_event(id, from, to, start, end).await?;

    println!(
        "{}",
        format!(
            "  Moved: {} to {} {}",
            event.name,
            to.format("%Y/%m/%d"),
            render::time_range(&event)
        )
        .green()
    );

    Ok(())
}
