//! JSON-file-backed record stores.
//!
//! A [`RecordStore`] holds every record of one kind in memory and rewrites
//! the whole backing file after each mutation. One async mutex per store
//! serializes every operation end to end, including the file write, so id
//! assignment and persist order follow lock-acquisition order.
//!
//! There is no cross-process locking: one process is expected to own each
//! backing file.

mod persist;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::StoreError;
use crate::models::{Category, Goal, ProgressEntry, Record};

pub type GoalStore = RecordStore<Goal>;
pub type ProgressStore = RecordStore<ProgressEntry>;

const GOALS_TEMP_PREFIX: &str = "g";
const PROGRESS_TEMP_PREFIX: &str = "fp";

struct State<R> {
    records: Vec<R>,
    /// `None` once `u32::MAX` has been handed out.
    next_id: Option<u32>,
}

/// An in-memory collection of records mirrored to one JSON file.
///
/// Cloning the store is cheap and yields a handle to the same collection.
/// Records go in by value and come out as clones, so callers never hold a
/// reference into the store's state.
pub struct RecordStore<R> {
    dir: PathBuf,
    path: PathBuf,
    temp_prefix: &'static str,
    state: Arc<Mutex<State<R>>>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            path: self.path.clone(),
            temp_prefix: self.temp_prefix,
            state: Arc::clone(&self.state),
        }
    }
}

impl RecordStore<Goal> {
    pub fn goals(config: &Config) -> Result<Self, StoreError> {
        Self::open(config.goals_path(), GOALS_TEMP_PREFIX)
    }
}

impl RecordStore<ProgressEntry> {
    pub fn progress(config: &Config) -> Result<Self, StoreError> {
        Self::open(config.progress_path(), PROGRESS_TEMP_PREFIX)
    }
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store backed by `path`, creating its directory if
    /// needed. Nothing is read until [`load`](Self::load).
    pub fn open(path: impl Into<PathBuf>, temp_prefix: &'static str) -> Result<Self, StoreError> {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(StoreError::io(&dir))?;

        Ok(Self {
            dir,
            path,
            temp_prefix,
            state: Arc::new(Mutex::new(State {
                records: Vec::new(),
                next_id: Some(1),
            })),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory collection with the file's contents.
    ///
    /// A missing file leaves the collection as it is. So does an unreadable or
    /// unparseable one: the failure is logged and the store carries on with
    /// what it already holds.
    pub async fn load(&self) {
        let mut state = self.state.lock().await;

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", self.path.display());
                return;
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", self.path.display(), e);
                return;
            }
        };

        match serde_json::from_slice::<Vec<R>>(&bytes) {
            Ok(records) => {
                state.next_id = next_id_after(&records);
                state.records = records;
                tracing::debug!(
                    "Loaded {} records from {}",
                    state.records.len(),
                    self.path.display()
                );
            }
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", self.path.display(), e);
            }
        }
    }

    /// Assign the next id, stamp `created_at` if unset, persist, and return a
    /// copy of what was stored.
    pub async fn add(&self, record: R) -> Result<R, StoreError> {
        let mut state = self.state.lock().await;

        let Some(id) = state.next_id else {
            tracing::error!("No ids left in {}", self.path.display());
            return Err(StoreError::IdsExhausted);
        };

        let mut stored = record;
        stored.set_id(id);
        if stored.created_at().is_none() {
            stored.set_created_at(Utc::now());
        }

        state.next_id = id.checked_add(1);
        state.records.push(stored.clone());

        let result = self.persist(&state.records).await;
        if let Err(e) = result {
            state.records.pop();
            state.next_id = Some(id);
            return Err(e);
        }

        tracing::debug!("Added record {} to {}", id, self.path.display());
        Ok(stored)
    }

    /// Every record, in insertion order.
    pub async fn get_all(&self) -> Vec<R> {
        self.state.lock().await.records.clone()
    }

    /// Records matching `predicate`, in insertion order.
    pub async fn get_where(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        let state = self.state.lock().await;
        state
            .records
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Records of one category, in insertion order.
    pub async fn by_category(&self, category: Category) -> Vec<R> {
        self.get_where(|r| r.category() == category).await
    }

    /// Remove the first record with `id`. Returns `false` if there was none.
    pub async fn delete(&self, id: u32) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;

        let Some(index) = state.records.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };
        let removed = state.records.remove(index);

        let result = self.persist(&state.records).await;
        if let Err(e) = result {
            state.records.insert(index, removed);
            return Err(e);
        }

        tracing::debug!("Deleted record {} from {}", id, self.path.display());
        Ok(true)
    }

    /// Swap in a whole new collection in one durable write.
    ///
    /// The id counter is recomputed from the new records but never moves
    /// backwards, so an id handed out earlier in this store's lifetime is not
    /// handed out again.
    pub async fn replace_all(&self, records: Vec<R>) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        let previous_next_id = state.next_id;
        state.next_id = match (previous_next_id, next_id_after(&records)) {
            (Some(current), Some(after)) => Some(current.max(after)),
            _ => None,
        };
        let previous = std::mem::replace(&mut state.records, records);

        let result = self.persist(&state.records).await;
        if let Err(e) = result {
            state.records = previous;
            state.next_id = previous_next_id;
            return Err(e);
        }

        Ok(())
    }

    async fn persist(&self, records: &[R]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(records)?;
        let result = persist::write_atomic(&self.dir, &self.path, self.temp_prefix, &json).await;
        if let Err(e) = &result {
            tracing::error!("Failed to persist {}: {}", self.path.display(), e);
        }
        result
    }
}

/// `None` when the highest id is already `u32::MAX`.
fn next_id_after<R: Record>(records: &[R]) -> Option<u32> {
    match records.iter().map(|r| r.id()).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
