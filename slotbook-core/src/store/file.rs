//! A [`RemoteStore`] kept in a single JSON document on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::{RemoteStore, day_segments};
use crate::day_key::MonthKey;
use crate::error::{SlotbookError, SlotbookResult};
use crate::event::EventData;
use crate::snapshot::MonthSnapshot;

/// year → month → month snapshot
type Tree = BTreeMap<String, BTreeMap<String, MonthSnapshot>>;

pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles within the process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> SlotbookResult<Tree> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(Tree::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Tree::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            SlotbookError::Serialization(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, tree: &Tree) -> SlotbookResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(tree)
            .map_err(|e| SlotbookError::Serialization(e.to_string()))?;

        let temp = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp, content)
            .await
            .map_err(|e| SlotbookError::Store(format!("writing {}: {}", temp.display(), e)))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| {
                SlotbookError::Store(format!("replacing {}: {}", self.path.display(), e))
            })?;
        Ok(())
    }

    async fn modify<F>(&self, f: F) -> SlotbookResult<()>
    where
        F: FnOnce(&mut Tree),
    {
        let _guard = self.write_lock.lock().await;
        let mut tree = self.load().await?;
        f(&mut tree);
        self.save(&tree).await
    }
}

fn set(tree: &mut Tree, date: NaiveDate, event_id: &str, event: &EventData) {
    let (year, month, day) = day_segments(date);
    tree.entry(year)
        .or_default()
        .entry(month)
        .or_default()
        .entry(day)
        .or_default()
        .insert(event_id.to_string(), event.clone());
}

/// Removes the event and any parent nodes left empty.
fn delete(tree: &mut Tree, date: NaiveDate, event_id: &str) {
    let (year, month, day) = day_segments(date);

    let Some(months) = tree.get_mut(&year) else {
        return;
    };
    if let Some(days) = months.get_mut(&month) {
        if let Some(events) = days.get_mut(&day) {
            events.remove(event_id);
            if events.is_empty() {
                days.remove(&day);
            }
        }
        if days.is_empty() {
            months.remove(&month);
        }
    }
    if months.is_empty() {
        tree.remove(&year);
    }
}

impl RemoteStore for FileStore {
    async fn fetch_month(&self, month: MonthKey) -> SlotbookResult<Option<MonthSnapshot>> {
        let mut tree = self.load().await?;
        let snapshot = tree
            .get_mut(&format!("{:04}", month.year()))
            .and_then(|months| months.remove(&format!("{:02}", month.month())))
            .filter(|days| !days.is_empty());

        debug!(month = %month, found = snapshot.is_some(), "fetched month");
        Ok(snapshot)
    }

    async fn push(&self, date: NaiveDate, event: &EventData) -> SlotbookResult<String> {
        let event_id = Uuid::new_v4().simple().to_string();
        self.modify(|tree| set(tree, date, &event_id, event)).await?;
        debug!(path = %super::event_path(date, &event_id), "pushed event");
        Ok(event_id)
    }

    async fn update(
        &self,
        date: NaiveDate,
        event_id: &str,
        event: &EventData,
    ) -> SlotbookResult<()> {
        self.modify(|tree| set(tree, date, event_id, event)).await?;
        debug!(path = %super::event_path(date, event_id), "updated event");
        Ok(())
    }

    async fn remove(&self, date: NaiveDate, event_id: &str) -> SlotbookResult<()> {
        self.modify(|tree| delete(tree, date, event_id)).await?;
        debug!(path = %super::event_path(date, event_id), "removed event");
        Ok(())
    }
}
