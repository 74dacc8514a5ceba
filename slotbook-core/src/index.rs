//! In-memory view of events, bucketed by day.
//!
//! The index is plain owned state. Whoever subscribes to the store owns one
//! and hands out references to the code that renders days; there is no
//! process-wide instance.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::day_key::{DayKey, MonthKey};
use crate::error::{SlotbookError, SlotbookResult};
use crate::event::{self, EventData};

type Bucket = BTreeMap<String, EventData>;

#[derive(Debug, Default, Clone)]
pub struct EventIndex {
    days: BTreeMap<DayKey, Bucket>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `event_id` under the day of `event_date`.
    ///
    /// Repeated delivery of the same record leaves a single entry.
    pub fn upsert(&mut self, event_id: &str, event: EventData, event_date: NaiveDate) {
        let key = DayKey::from_date(event_date);
        debug!(day = %key, id = event_id, "upsert event");
        self.days
            .entry(key)
            .or_default()
            .insert(event_id.to_string(), event);
    }

    /// Remove `event_id` from the day of `event_date`.
    ///
    /// Returns `Ok(None)` if the day is loaded but the id is not in it, and
    /// [`SlotbookError::DayNotFound`] if nothing was ever loaded for that day.
    pub fn remove(
        &mut self,
        event_id: &str,
        event_date: NaiveDate,
    ) -> SlotbookResult<Option<EventData>> {
        let key = DayKey::from_date(event_date);
        let Some(bucket) = self.days.get_mut(&key) else {
            warn!(day = %key, id = event_id, "remove from a day that was never loaded");
            return Err(SlotbookError::DayNotFound(key.to_string()));
        };

        let removed = bucket.remove(event_id);
        if removed.is_none() {
            debug!(day = %key, id = event_id, "remove of unknown event");
        }
        Ok(removed)
    }

    pub fn get(&self, event_id: &str, date: NaiveDate) -> Option<&EventData> {
        self.days.get(&DayKey::from_date(date))?.get(event_id)
    }

    /// Events of one day, earliest first.
    ///
    /// Sorted by first slot, then last slot. Built fresh on every call so it
    /// always reflects the latest state of the bucket.
    pub fn view_day(&self, date: NaiveDate) -> Vec<(&str, &EventData)> {
        let Some(bucket) = self.days.get(&DayKey::from_date(date)) else {
            return Vec::new();
        };

        let mut entries: Vec<(&str, &EventData)> = bucket
            .iter()
            .map(|(id, event)| (id.as_str(), event))
            .collect();
        entries.sort_by(|(_, a), (_, b)| event::cmp_by_slots(a, b));
        entries
    }

    pub fn day_count(&self, date: NaiveDate) -> usize {
        self.days
            .get(&DayKey::from_date(date))
            .map_or(0, |bucket| bucket.len())
    }

    /// Days of `month` that have at least one event, ascending.
    pub fn days_in_month(&self, month: MonthKey) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|(key, bucket)| month.contains(key.date()) && !bucket.is_empty())
            .map(|(key, _)| key.date())
            .collect()
    }

    /// Drop every event of `month` whose `(day, id)` is not in `keep`.
    /// Returns what was dropped.
    pub fn prune_month(
        &mut self,
        month: MonthKey,
        keep: &HashSet<(DayKey, String)>,
    ) -> Vec<(DayKey, String)> {
        let mut dropped = Vec::new();

        for (key, bucket) in self.days.iter_mut() {
            if !month.contains(key.date()) {
                continue;
            }
            bucket.retain(|id, _| {
                let retained = keep.contains(&(*key, id.clone()));
                if !retained {
                    dropped.push((*key, id.clone()));
                }
                retained
            });
        }

        dropped
    }

    /// Total number of events across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(|bucket| bucket.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
