//! A working session over a store and the index fed from it.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::day_key::MonthKey;
use crate::draft::{DraftError, EventDraft};
use crate::error::{SlotbookError, SlotbookResult};
use crate::event::EventData;
use crate::index::EventIndex;
use crate::snapshot::{self, IngestReport, ReconcilePolicy};
use crate::store::{self, RemoteStore};
use crate::time_window::{self, Slot};

/// Owns the index and the store it mirrors.
///
/// Every write goes to the store first and is then applied to the index, so
/// the index never holds something the store rejected.
pub struct Schedule<S> {
    store: S,
    index: EventIndex,
    policy: ReconcilePolicy,
    subscribed: BTreeSet<MonthKey>,
}

impl<S: RemoteStore> Schedule<S> {
    pub fn new(store: S, policy: ReconcilePolicy) -> Self {
        Schedule {
            store,
            index: EventIndex::new(),
            policy,
            subscribed: BTreeSet::new(),
        }
    }

    pub fn index(&self) -> &EventIndex {
        &self.index
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load (or reload) a month from the store into the index.
    pub async fn subscribe_month(&mut self, month: MonthKey) -> SlotbookResult<IngestReport> {
        let snapshot = self.store.fetch_month(month).await?;
        let report = snapshot::ingest_month(&mut self.index, month, snapshot, self.policy);
        self.subscribed.insert(month);
        Ok(report)
    }

    async fn ensure_month(&mut self, date: NaiveDate) -> SlotbookResult<()> {
        let month = MonthKey::from_date(date);
        if !self.subscribed.contains(&month) {
            self.subscribe_month(month).await?;
        }
        Ok(())
    }

    /// Events of `date`, earliest first.
    pub fn day(&self, date: NaiveDate) -> Vec<(&str, &EventData)> {
        self.index.view_day(date)
    }

    /// Validate a draft, store it, and index it under its day.
    pub async fn create(
        &mut self,
        draft: &EventDraft,
        added_by: &str,
        now: DateTime<Utc>,
    ) -> SlotbookResult<(String, NaiveDate)> {
        let (date, event) = draft.validate(added_by, now)?;
        self.ensure_month(date).await?;

        let event_id = self.store.push(date, &event).await?;
        info!(path = %store::event_path(date, &event_id), name = %event.name, "created event");

        self.index.upsert(&event_id, event, date);
        Ok((event_id, date))
    }

    /// Move an event to another day and/or other slots.
    ///
    /// With only `start` given the event keeps its length and is shifted to
    /// begin there. With only `end` given the start stays put. With neither it
    /// keeps its slots and only changes day.
    ///
    /// A day change writes the new path before removing the old one. If the
    /// removal fails the new path is removed again, so the store is left with
    /// the event on exactly one day, matching the index.
    pub async fn move_event(
        &mut self,
        event_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        start: Option<Slot>,
        end: Option<Slot>,
    ) -> SlotbookResult<EventData> {
        self.ensure_month(from).await?;

        let mut event = self
            .index
            .get(event_id, from)
            .cloned()
            .ok_or_else(|| SlotbookError::EventNotFound(store::event_path(from, event_id)))?;

        let (start, end) = target_slots(&event, start, end)?;
        event.reslot(start, end);

        self.store.update(to, event_id, &event).await?;
        if to != from {
            if let Err(err) = self.store.remove(from, event_id).await {
                return Err(self.undo_copy(to, event_id, err).await);
            }
            self.index.remove(event_id, from)?;
            self.ensure_month(to).await?;
        }

        debug!(id = event_id, from = %from, to = %to, start, end, "moved event");
        self.index.upsert(event_id, event.clone(), to);
        Ok(event)
    }

    /// Drop the copy written at `to` after the old path could not be removed.
    async fn undo_copy(
        &self,
        to: NaiveDate,
        event_id: &str,
        err: SlotbookError,
    ) -> SlotbookError {
        let path = store::event_path(to, event_id);
        match self.store.remove(to, event_id).await {
            Ok(()) => {
                warn!(path = %path, error = %err, "move failed, copy removed");
                err
            }
            Err(undo) => SlotbookError::Store(format!(
                "event is now stored twice, {} could not be removed ({}) after: {}",
                path, undo, err
            )),
        }
    }

    /// Delete an event from the store and the index.
    ///
    /// Returns the removed record, or `None` if the index did not know the id.
    pub async fn delete(
        &mut self,
        event_id: &str,
        date: NaiveDate,
    ) -> SlotbookResult<Option<EventData>> {
        self.ensure_month(date).await?;
        self.store.remove(date, event_id).await?;

        let removed = self.index.remove(event_id, date).or_else(|err| match err {
            // nothing was ever stored for that day
            SlotbookError::DayNotFound(_) => Ok(None),
            other => Err(other),
        })?;

        if removed.is_some() {
            info!(path = %store::event_path(date, event_id), "deleted event");
        }
        Ok(removed)
    }
}

/// Resolve the slots an event should occupy after a move.
fn target_slots(
    event: &EventData,
    start: Option<Slot>,
    end: Option<Slot>,
) -> Result<(Slot, Slot), DraftError> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        (Some(start), None) => {
            let first = event.first_slot().ok_or(DraftError::MissingEndSlot)?;
            let last = event.last_slot().ok_or(DraftError::MissingEndSlot)?;
            let end = last
                .checked_sub(first)
                .and_then(|length| start.checked_add(length))
                .ok_or(DraftError::SlotOutOfRange(start))?;
            (start, end)
        }
        (None, end) => {
            let start = event.first_slot().ok_or(DraftError::MissingStartSlot)?;
            let end = end.or(event.last_slot()).ok_or(DraftError::MissingEndSlot)?;
            (start, end)
        }
    };

    for slot in [start, end] {
        if !time_window::is_valid_slot(slot) {
            return Err(DraftError::SlotOutOfRange(slot));
        }
    }
    if start > end {
        return Err(DraftError::EndBeforeStart);
    }
    Ok((start, end))
}
