use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{Category, Goal};
use crate::store::GoalStore;

/// Goal orchestration: "one active goal per category" on top of a
/// [`GoalStore`]. Loading, listing and deleting pass straight through.
#[derive(Clone)]
pub struct GoalService {
    store: GoalStore,
    // Held across the multi-step save so two saves cannot interleave between
    // reading the goals and writing them back.
    writes: Arc<Mutex<()>>,
}

impl GoalService {
    pub fn new(store: GoalStore) -> Self {
        Self {
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load_goals(&self) {
        self.store.load().await;
    }

    pub async fn all_goals(&self) -> Vec<Goal> {
        self.store.get_all().await
    }

    pub async fn delete_goal(&self, id: u32) -> Result<bool> {
        let _writes = self.writes.lock().await;
        Ok(self.store.delete(id).await?)
    }

    /// Save `goal` as the active goal of its category.
    ///
    /// Any currently active goals of that category are deactivated and
    /// persisted first, then the new goal is added. A crash between the two
    /// writes leaves no active goal for the category, never two.
    pub async fn save_goal(&self, mut goal: Goal) -> Result<Goal> {
        let _writes = self.writes.lock().await;

        let mut all = self.store.get_all().await;
        let mut deactivated = 0;
        for existing in all
            .iter_mut()
            .filter(|g| g.category == goal.category && g.is_active)
        {
            existing.is_active = false;
            deactivated += 1;
        }

        if deactivated > 0 {
            tracing::info!(
                "Deactivating {} active {} goal(s)",
                deactivated,
                goal.category
            );
            self.store.replace_all(all).await?;
        }

        goal.is_active = true;
        goal.created_at = Some(Utc::now());

        let saved = self.store.add(goal).await?;
        tracing::info!(
            "Saved {} goal {}: {} {}",
            saved.category,
            saved.id,
            saved.value,
            saved.unit
        );
        Ok(saved)
    }

    /// The active goal for `category`, if any.
    pub async fn active_goal(&self, category: Category) -> Option<Goal> {
        self.store
            .get_all()
            .await
            .into_iter()
            .find(|g| g.category == category && g.is_active)
    }

    /// Like [`active_goal`](Self::active_goal) for a raw category tag. Blank
    /// or unknown tags yield `None`; a blank tag never reaches the store.
    pub async fn active_goal_by_tag(&self, tag: &str) -> Option<Goal> {
        if tag.trim().is_empty() {
            return None;
        }
        let category = Category::from_tag(tag)?;
        self.active_goal(category).await
    }
}
