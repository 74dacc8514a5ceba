use slotbook_core::constants::SLOTS_PER_DAY;
use slotbook_core::time_window::{self, Boundary};

use crate::render;

pub fn run() {
    for (slot, _) in time_window::slot_options(Boundary::Start) {
        println!("{}", render::slot_line(slot));
    }
    // closing time
    if let Some(label) = time_window::slot_label(SLOTS_PER_DAY - 1, Boundary::End) {
        println!("    {}", label);
    }
}
