use std::path::Path;

use fittrack::config::{Config, GOALS_FILE, PROGRESS_FILE};
use fittrack::models::*;
use fittrack::store::{GoalStore, ProgressStore};
use tempfile::TempDir;

fn setup() -> (TempDir, Config) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::new(dir.path());
    (dir, config)
}

fn water_goal(value: f64) -> Goal {
    Goal::from_water_content(&WaterContent::new(value, WaterUnit::Liters))
        .expect("Failed to build goal")
}

fn running_goal(value: f64, unit: DistanceUnit) -> Goal {
    Goal::from_running_distance(&RunningDistance::new(value, unit)).expect("Failed to build goal")
}

fn temp_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("Failed to read data dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect()
}

mod add {
    use super::*;

    #[tokio::test]
    async fn creates_the_goals_file() {
        let (dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");

        store
            .add(running_goal(1.0, DistanceUnit::Kilometers))
            .await
            .expect("Failed to add");

        assert!(dir.path().join(GOALS_FILE).exists());
    }

    #[tokio::test]
    async fn creates_a_missing_data_directory() {
        let (dir, _) = setup();
        let nested = dir.path().join("nested").join("SaveData");
        let store = GoalStore::goals(&Config::new(&nested)).expect("Failed to open store");

        store.add(water_goal(1.0)).await.expect("Failed to add");

        assert!(nested.join(GOALS_FILE).exists());
    }

    #[tokio::test]
    async fn assigns_sequential_ids_from_one() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");

        let first = store.add(water_goal(1.0)).await.expect("Failed to add");
        let second = store.add(water_goal(2.0)).await.expect("Failed to add");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn stamps_created_at_only_when_unset() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        let fixed = chrono::DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .expect("Failed to parse timestamp")
            .with_timezone(&chrono::Utc);

        let stamped = store.add(water_goal(1.0)).await.expect("Failed to add");
        let mut preset = water_goal(2.0);
        preset.created_at = Some(fixed);
        let kept = store.add(preset).await.expect("Failed to add");

        assert!(stamped.created_at.is_some());
        assert_eq!(kept.created_at, Some(fixed));
    }

    #[tokio::test]
    async fn returned_copy_is_independent_of_the_store() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");

        let mut saved = store.add(water_goal(1.0)).await.expect("Failed to add");
        saved.value = 99.0;
        saved.is_active = false;

        let all = store.get_all().await;
        assert_eq!(all[0].value, 1.0);
        assert!(all[0].is_active);
    }

    #[tokio::test]
    async fn leaves_no_temp_files() {
        let (dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");

        let goal = store
            .add(running_goal(7.0, DistanceUnit::Kilometers))
            .await
            .expect("Failed to add");
        store.add(water_goal(3.0)).await.expect("Failed to add");
        store.delete(goal.id).await.expect("Failed to delete");

        assert!(temp_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn failed_persist_is_reported_and_rolled_back() {
        let (dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");
        let before = std::fs::read_to_string(dir.path().join(GOALS_FILE)).expect("read");

        // Swap the goals file for a non-empty directory so the rename fails.
        let goals_path = dir.path().join(GOALS_FILE);
        std::fs::remove_file(&goals_path).expect("remove");
        std::fs::create_dir(&goals_path).expect("mkdir");
        std::fs::write(goals_path.join("blocker"), before.as_bytes()).expect("write");

        let result = store.add(water_goal(2.0)).await;

        assert!(result.is_err());
        assert_eq!(store.get_all().await.len(), 1);
        assert!(temp_files(dir.path()).is_empty());

        // The failed id is not burned.
        std::fs::remove_dir_all(&goals_path).expect("cleanup");
        let next = store.add(water_goal(3.0)).await.expect("Failed to add");
        assert_eq!(next.id, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_get_distinct_ids() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..10u32 {
            let store = store.clone();
            tasks.spawn(async move { store.add(water_goal(f64::from(i + 1))).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.expect("Task panicked").expect("Failed to add");
        }

        let all = store.get_all().await;
        let mut ids: Vec<u32> = all.iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(all.len(), 10);
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());

        let reloaded = GoalStore::goals(&config).expect("Failed to open store");
        reloaded.load().await;
        assert_eq!(reloaded.get_all().await.len(), 10);
    }
}

mod load {
    use super::*;

    #[tokio::test]
    async fn round_trips_through_a_fresh_store() {
        let (_dir, config) = setup();
        let original = Goal::from_water_content(&WaterContent::new(8.0, WaterUnit::Ounces))
            .expect("Failed to build goal");

        let first = GoalStore::goals(&config).expect("Failed to open store");
        let saved = first.add(original.clone()).await.expect("Failed to add");

        let second = GoalStore::goals(&config).expect("Failed to open store");
        second.load().await;
        let all = second.get_all().await;

        assert_eq!(all.len(), 1);
        let loaded = &all[0];
        assert_eq!(loaded.id, saved.id);
        assert_eq!(loaded.category, original.category);
        assert_eq!(loaded.value, original.value);
        assert_eq!(loaded.unit, original.unit);
        assert_eq!(loaded.created_at, saved.created_at);
        assert_eq!(loaded.is_active, saved.is_active);
    }

    #[tokio::test]
    async fn continues_ids_across_restarts() {
        let (_dir, config) = setup();

        let first = GoalStore::goals(&config).expect("Failed to open store");
        let g1 = first.add(water_goal(1.0)).await.expect("Failed to add");
        let g2 = first.add(water_goal(2.0)).await.expect("Failed to add");

        let second = GoalStore::goals(&config).expect("Failed to open store");
        second.load().await;
        let g3 = second.add(water_goal(3.0)).await.expect("Failed to add");

        assert_eq!([g1.id, g2.id, g3.id], [1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_file_leaves_store_empty() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");

        store.load().await;

        assert!(store.get_all().await.is_empty());
        let goal = store.add(water_goal(1.0)).await.expect("Failed to add");
        assert_eq!(goal.id, 1);
    }

    #[tokio::test]
    async fn corrupt_file_keeps_in_memory_state() {
        let (dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");

        std::fs::write(dir.path().join(GOALS_FILE), "{ not json").expect("write");
        store.load().await;

        let all = store.get_all().await;
        assert_eq!(all.len(), 1);
        let next = store.add(water_goal(2.0)).await.expect("Failed to add");
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn computes_next_id_from_the_highest_stored_id() {
        let (dir, config) = setup();
        std::fs::write(
            dir.path().join(PROGRESS_FILE),
            r#"[
  {"id": 7, "category": "Running", "value": 2.5, "unit": "Miles", "createdAt": "2024-05-01T10:00:00Z"},
  {"id": 3, "category": "Water", "value": 16.0, "unit": "Ounces", "createdAt": "2024-05-01T11:00:00Z"}
]"#,
        )
        .expect("write");

        let store = ProgressStore::progress(&config).expect("Failed to open store");
        store.load().await;
        let entry = ProgressEntry::from_water_content(&WaterContent::new(1.0, WaterUnit::Cups))
            .expect("Failed to build entry");
        let saved = store.add(entry).await.expect("Failed to add");

        assert_eq!(saved.id, 8);
        let all = store.get_all().await;
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7, 3, 8]);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn removes_the_record_and_returns_true() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        let goal = store
            .add(running_goal(2.0, DistanceUnit::Miles))
            .await
            .expect("Failed to add");

        let removed = store.delete(goal.id).await.expect("Failed to delete");

        assert!(removed);
        assert!(store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_returns_false_and_changes_nothing() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");

        let removed = store.delete(42).await.expect("Failed to delete");

        assert!(!removed);
        assert_eq!(store.get_all().await.len(), 1);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");
        let second = store.add(water_goal(2.0)).await.expect("Failed to add");

        store.delete(second.id).await.expect("Failed to delete");
        let third = store.add(water_goal(3.0)).await.expect("Failed to add");

        assert_eq!(third.id, 3);
    }
}

mod replace_all {
    use super::*;

    #[tokio::test]
    async fn persists_the_new_collection() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");
        store.add(water_goal(2.0)).await.expect("Failed to add");

        let mut all = store.get_all().await;
        for goal in &mut all {
            goal.is_active = false;
        }
        store.replace_all(all).await.expect("Failed to replace");

        let reloaded = GoalStore::goals(&config).expect("Failed to open store");
        reloaded.load().await;
        assert!(reloaded.get_all().await.iter().all(|g| !g.is_active));
    }

    #[tokio::test]
    async fn never_moves_the_id_counter_backwards() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");
        store.add(water_goal(2.0)).await.expect("Failed to add");

        store.replace_all(Vec::new()).await.expect("Failed to replace");
        let next = store.add(water_goal(3.0)).await.expect("Failed to add");

        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn advances_the_id_counter_past_new_records() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        let mut imported = water_goal(1.0);
        imported.id = 10;

        store.replace_all(vec![imported]).await.expect("Failed to replace");
        let next = store.add(water_goal(2.0)).await.expect("Failed to add");

        assert_eq!(next.id, 11);
    }
}

mod get_where {
    use super::*;

    #[tokio::test]
    async fn filters_in_insertion_order() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store.add(water_goal(1.0)).await.expect("Failed to add");
        store
            .add(running_goal(5.0, DistanceUnit::Feet))
            .await
            .expect("Failed to add");
        store.add(water_goal(3.0)).await.expect("Failed to add");

        let water = store.get_where(|g| g.is_water()).await;

        assert_eq!(water.iter().map(|g| g.value).collect::<Vec<_>>(), vec![1.0, 3.0]);
    }
}

mod id_exhaustion {
    use super::*;
    use fittrack::error::StoreError;

    fn seed_goal_with_id(store: &GoalStore, id: u32) {
        std::fs::write(
            store.path(),
            format!(
                r#"[{{"id": {id}, "category": "Water", "value": 1.0, "unit": "Liters", "createdAt": "2024-05-01T10:00:00Z", "isActive": true}}]"#
            ),
        )
        .expect("write");
    }

    #[tokio::test]
    async fn add_fails_once_the_highest_id_is_taken() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        seed_goal_with_id(&store, u32::MAX);
        store.load().await;

        let result = store.add(water_goal(2.0)).await;

        assert!(matches!(result, Err(StoreError::IdsExhausted)));
        let all = store.get_all().await;
        assert_eq!(all.iter().map(|g| g.id).collect::<Vec<_>>(), vec![u32::MAX]);
    }

    #[tokio::test]
    async fn hands_out_the_last_id_then_fails() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        seed_goal_with_id(&store, u32::MAX - 1);
        store.load().await;

        let last = store.add(water_goal(2.0)).await.expect("Failed to add");
        let next = store.add(water_goal(3.0)).await;

        assert_eq!(last.id, u32::MAX);
        assert!(matches!(next, Err(StoreError::IdsExhausted)));
        assert_eq!(store.get_all().await.len(), 2);
    }

    #[tokio::test]
    async fn replace_all_with_the_highest_id_stops_further_adds() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        let mut imported = water_goal(1.0);
        imported.id = u32::MAX;

        store.replace_all(vec![imported]).await.expect("Failed to replace");

        assert!(matches!(
            store.add(water_goal(2.0)).await,
            Err(StoreError::IdsExhausted)
        ));
    }
}

mod paths {
    use super::*;

    #[tokio::test]
    async fn stores_use_the_configured_file_paths() {
        let (_dir, config) = setup();
        let goals = GoalStore::goals(&config).expect("Failed to open store");
        let progress = ProgressStore::progress(&config).expect("Failed to open store");

        assert_eq!(goals.path(), config.goals_path());
        assert_eq!(progress.path(), config.progress_path());
    }
}

mod by_category {
    use super::*;

    #[tokio::test]
    async fn returns_only_the_requested_category() {
        let (_dir, config) = setup();
        let store = GoalStore::goals(&config).expect("Failed to open store");
        store
            .add(running_goal(5.0, DistanceUnit::Miles))
            .await
            .expect("Failed to add");
        store.add(water_goal(2.0)).await.expect("Failed to add");

        let running = store.by_category(Category::Running).await;

        assert_eq!(running.len(), 1);
        assert_eq!(running[0].category(), Category::Running);
    }
}
