//! Terminal rendering for slotbook types.
//!
//! Extension traits that add colored output to slotbook-core types using owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use slotbook_core::EventData;
use slotbook_core::time_window::{self, Boundary, Slot};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Parse `#rrggbb` into its components.
fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn swatch(color: &str) -> String {
    let (r, g, b) = hex_to_rgb(color).unwrap_or((255, 255, 255));
    "●".truecolor(r, g, b).to_string()
}

/// `09:30–10:15`, or a placeholder for events without slots.
pub fn time_range(event: &EventData) -> String {
    match (event.start_label(), event.end_label()) {
        (Some(start), Some(end)) => format!("{}–{}", start, end),
        _ => "--:--–--:--".to_string(),
    }
}

impl Render for EventData {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{} {} {}",
            time_range(self).bold(),
            swatch(&self.color),
            self.name
        )];

        let indent = " ".repeat(14);
        if !self.note.is_empty() {
            lines.push(format!("{}{}", indent, self.note.dimmed()));
        }

        let contact: Vec<&str> = [self.email.as_str(), self.phone.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !contact.is_empty() {
            lines.push(format!("{}{}", indent, contact.join(" · ").dimmed()));
        }

        lines.join("\n")
    }
}

/// Heading for a day view, e.g. `📅 2024/03/15 Friday`.
pub fn day_heading(date: NaiveDate) -> String {
    format!(
        "📅 {} {}",
        date.format("%Y/%m/%d").bold(),
        date.format("%A").dimmed()
    )
}

/// One line of the slot grid: full hours stand out, quarter hours are dimmed.
pub fn slot_line(slot: Slot) -> String {
    let label = time_window::slot_label(slot, Boundary::Start).unwrap_or_else(|| "--:--".into());
    if time_window::is_hour_mark(slot) {
        format!("{:>2}  {}", slot, label.bold())
    } else {
        format!("{:>2}  {}", slot, label.dimmed())
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
