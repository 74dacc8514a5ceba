use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use slotbook_core::day_key;
use slotbook_core::store::RemoteStore;
use slotbook_core::{MonthKey, Schedule};

use crate::render::pluralize;

pub async fn run<S: RemoteStore>(
    schedule: &mut Schedule<S>,
    path: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let month = MonthKey::from_date(path.map_or(today, |p| day_key::day_from_path(p, today)));
    schedule.subscribe_month(month).await?;

    println!("📅 {}", month.to_string().bold());

    let days = schedule.index().days_in_month(month);
    if days.is_empty() {
        println!("   No appointments");
        return Ok(());
    }

    for date in days {
        let count = schedule.index().day_count(date);
        let line = format!(
            "{} {:<9} {} {}",
            date.format("%d"),
            date.format("%A").to_string(),
            count,
            pluralize("appointment", count)
        );
        if date == today {
            println!("   {}", line.green());
        } else {
            println!("   {}", line);
        }
    }

    Ok(())
}
