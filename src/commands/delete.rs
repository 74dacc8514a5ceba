use anyhow::Result;
use owo_colors::OwoColorize;
use slotbook_core::Schedule;
use slotbook_core::store::RemoteStore;

use super::parse_day;

pub async fn run<S: RemoteStore>(schedule: &mut Schedule<S>, id: &str, day: &str) -> Result<()> {
    let date = parse_day(day)?;

    match schedule.delete(id, date).await? {
        Some(event) => println!("{}", format!("  Deleted: {}", event.name).red()),
        None => println!(
            "{}",
            format!("  No appointment {} on {}", id, date.format("%Y/%m/%d")).yellow()
        ),
    }

    Ok(())
}
