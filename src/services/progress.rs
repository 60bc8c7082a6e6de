use chrono::Utc;

use crate::error::Result;
use crate::models::{Category, ProgressEntry};
use crate::store::ProgressStore;

/// Pass-through over a [`ProgressStore`] that stamps entries on save.
#[derive(Clone)]
pub struct ProgressService {
    store: ProgressStore,
}

impl ProgressService {
    pub fn new(store: ProgressStore) -> Self {
        Self { store }
    }

    pub async fn load_progress(&self) {
        self.store.load().await;
    }

    pub async fn save_progress(&self, mut entry: ProgressEntry) -> Result<ProgressEntry> {
        entry.created_at = Some(Utc::now());
        let saved = self.store.add(entry).await?;
        tracing::info!(
            "Logged {} progress {}: {} {}",
            saved.category,
            saved.id,
            saved.value,
            saved.unit
        );
        Ok(saved)
    }

    pub async fn all_progress(&self) -> Vec<ProgressEntry> {
        self.store.get_all().await
    }

    pub async fn progress_by_category(&self, category: Category) -> Vec<ProgressEntry> {
        self.store.by_category(category).await
    }

    /// Entries whose category tag is exactly `tag`. Blank tags return an
    /// empty list without touching the store.
    pub async fn progress_by_tag(&self, tag: &str) -> Vec<ProgressEntry> {
        if tag.trim().is_empty() {
            return Vec::new();
        }
        match Category::from_tag(tag) {
            Some(category) => self.progress_by_category(category).await,
            None => Vec::new(),
        }
    }
}
