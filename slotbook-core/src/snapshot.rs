//! Feeding month snapshots from the store into the index.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::day_key::{DayKey, MonthKey};
use crate::event::EventData;
use crate::index::EventIndex;

/// What the store holds under a `YYYY/MM` path: day segment → event id → event.
pub type MonthSnapshot = BTreeMap<String, BTreeMap<String, EventData>>;

/// How a snapshot relates to what the index already holds for that month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Only upsert; events missing from the snapshot stay in the index.
    Accumulate,
    /// The snapshot is the whole month; events missing from it are dropped.
    #[default]
    TrustSnapshot,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub upserted: usize,
    pub skipped: usize,
    pub pruned: usize,
}

/// Apply one snapshot of `month`. `None` means the store has no data there.
pub fn ingest_month(
    index: &mut EventIndex,
    month: MonthKey,
    snapshot: Option<MonthSnapshot>,
    policy: ReconcilePolicy,
) -> IngestReport {
    let mut report = IngestReport::default();
    let mut seen: HashSet<(DayKey, String)> = HashSet::new();

    for (segment, events) in snapshot.unwrap_or_default() {
        let Some(date) = segment.trim().parse::<u32>().ok().and_then(|d| month.day(d)) else {
            warn!(month = %month, segment = %segment, "skipping invalid day in snapshot");
            report.skipped += events.len();
            continue;
        };

        for (event_id, event) in events {
            seen.insert((DayKey::from_date(date), event_id.clone()));
            index.upsert(&event_id, event, date);
            report.upserted += 1;
        }
    }

    if policy == ReconcilePolicy::TrustSnapshot {
        report.pruned = index.prune_month(month, &seen).len();
    }

    debug!(
        month = %month,
        upserted = report.upserted,
        skipped = report.skipped,
        pruned = report.pruned,
        "ingested month snapshot"
    );

    report
}
