use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use psplit_engine::SplitState;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::normalize::{blank_state, gen_id, normalize_state};

/// One saved session: a snapshot plus the date/title shown in the record list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub date: String,
    pub title: String,
    pub data: SplitState,
}

impl Record {
    fn from_state(state: SplitState) -> Self {
        Self {
            id: gen_id("tab"),
            date: state.date.clone(),
            title: state.title.clone(),
            data: state,
        }
    }
}

/// Ordered set of records with one active record.
///
/// Never empty, and `active_id` always names an existing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBook {
    active_id: String,
    items: Vec<Record>,
}

impl RecordBook {
    /// A book holding one blank record dated today.
    pub fn fresh() -> Self {
        let record = Record::from_state(blank_state());
        Self {
            active_id: record.id.clone(),
            items: vec![record],
        }
    }

    /// Rebuild from stored JSON. Each record's data goes through
    /// [`normalize_state`]; a dangling active id falls back to the first record.
    pub fn from_json(raw: &Value) -> Self {
        let items: Vec<Record> = raw
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|it| {
                let data = normalize_state(it.get("data").unwrap_or(&Value::Null));
                Record {
                    id: it
                        .get("id")
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .unwrap_or_else(|| gen_id("tab")),
                    date: it
                        .get("date")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| data.date.clone()),
                    title: it
                        .get("title")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| data.title.clone()),
                    data,
                }
            })
            .collect();

        if items.is_empty() {
            return Self::fresh();
        }

        let wanted = raw.get("activeId").and_then(Value::as_str).unwrap_or("");
        let active_id = if items.iter().any(|r| r.id == wanted) {
            wanted.to_string()
        } else {
            items[0].id.clone()
        };
        Self { active_id, items }
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn records(&self) -> &[Record] {
        &self.items
    }

    pub fn active(&self) -> &Record {
        self.items
            .iter()
            .find(|r| r.id == self.active_id)
            .unwrap_or(&self.items[0])
    }

    pub fn active_state(&self) -> &SplitState {
        &self.active().data
    }

    /// Make `id` the active record.
    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.items.iter().any(|r| r.id == id) {
            bail!("unknown record id: {id}");
        }
        self.active_id = id.to_string();
        Ok(())
    }

    /// Append a blank record dated today and make it active.
    pub fn add_blank(&mut self) -> &Record {
        let record = Record::from_state(blank_state());
        self.active_id = record.id.clone();
        self.items.push(record);
        &self.items[self.items.len() - 1]
    }

    /// Remove a record. Removing the last one leaves a fresh blank record;
    /// removing the active one activates its neighbour.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let Some(pos) = self.items.iter().position(|r| r.id == id) else {
            bail!("unknown record id: {id}");
        };
        self.items.remove(pos);
        if self.items.is_empty() {
            *self = Self::fresh();
            return Ok(());
        }
        if self.active_id == id {
            let next = pos.min(self.items.len() - 1);
            self.active_id = self.items[next].id.clone();
        }
        Ok(())
    }

    /// Write `state` into the active record (date and title follow the state).
    pub fn update_active(&mut self, state: &SplitState) {
        let active_id = self.active_id.clone();
        if let Some(r) = self.items.iter_mut().find(|r| r.id == active_id) {
            r.date = state.date.clone();
            r.title = state.title.clone();
            r.data = state.clone();
        }
    }
}

/// Load a record book. A missing file yields a fresh book; unreadable or
/// non-JSON content is an error.
pub fn load_record_book(path: &Path) -> Result<RecordBook> {
    if !path.exists() {
        debug!(path = %path.display(), "record book missing; starting fresh");
        return Ok(RecordBook::fresh());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read record book failed: {}", path.display()))?;
    let v: Value = serde_json::from_str(raw.trim_start_matches('\u{feff}'))
        .with_context(|| format!("record book is not valid JSON: {}", path.display()))?;
    Ok(RecordBook::from_json(&v))
}

/// Save `book` with `state` written into its active record.
pub fn save_record_book(path: &Path, book: &RecordBook, state: &SplitState) -> Result<()> {
    let mut next = book.clone();
    next.update_active(state);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("create record book dir failed: {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(&next).context("serialize record book failed")?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write record book failed: {}", path.display()))?;
    info!(path = %path.display(), records = next.items.len(), "record book saved");
    Ok(())
}
