#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use habitual::db::store::LocalStore;
    use habitual::libs::habit::{HabitDraft, HabitUpdate};
    use habitual::libs::repository::{HabitRepository, StoreError};
    use habitual::libs::session::NewSession;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct StoreTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        store: LocalStore,
    }

    impl AsyncTestContext for StoreTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("habitual.db");
            let store = LocalStore::open(&db_path).unwrap();
            StoreTestContext {
                _temp_dir: temp_dir,
                db_path,
                store,
            }
        }
    }

    fn reading() -> HabitDraft {
        HabitDraft::new("Reading", 8, "1 hour/day")
            .with_description("Daily reading")
            .with_resources(vec!["https://goodreads.com".to_string(), "Local library".to_string()])
            .with_color(Some("#2563eb".to_string()))
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_create_and_get_habit(ctx: &mut StoreTestContext) {
        let created = ctx.store.create(&reading()).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.time_spent, Duration::zero());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = ctx.store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.resources, vec!["https://goodreads.com", "Local library"]);
        assert_eq!(fetched.color.as_deref(), Some("#2563eb"));
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_list_is_newest_first(ctx: &mut StoreTestContext) {
        let first = ctx.store.create(&HabitDraft::new("Reading", 8, "1 hour/day")).await.unwrap();
        let second = ctx.store.create(&HabitDraft::new("Exercise", 9, "45 mins/day")).await.unwrap();
        let third = ctx.store.create(&HabitDraft::new("Meditation", 7, "20 mins/day")).await.unwrap();

        let ids: Vec<String> = ctx.store.list().await.unwrap().into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_update_changes_only_given_fields(ctx: &mut StoreTestContext) {
        let created = ctx.store.create(&reading()).await.unwrap();

        let update = HabitUpdate {
            goal: Some("2 hours/day".to_string()),
            ..HabitUpdate::time_spent(Duration::minutes(90))
        }
        .importance(42);
        let updated = ctx.store.update(&created.id, &update).await.unwrap();

        assert_eq!(updated.goal, "2 hours/day");
        assert_eq!(updated.time_spent, Duration::minutes(90));
        assert_eq!(updated.importance, 10);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.resources, created.resources);
        assert!(updated.updated_at >= created.updated_at);

        let fetched = ctx.store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_update_and_delete_unknown_habit(ctx: &mut StoreTestContext) {
        let update = HabitUpdate::time_spent(Duration::minutes(1));

        assert!(matches!(ctx.store.update("missing", &update).await, Err(StoreError::NotFound(_))));
        assert!(matches!(ctx.store.delete("missing").await, Err(StoreError::NotFound(_))));
        assert!(ctx.store.get("missing").await.unwrap().is_none());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_sessions_are_listed_most_recent_first(ctx: &mut StoreTestContext) {
        let habit = ctx.store.create(&reading()).await.unwrap();
        let morning = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2025, 3, 1, 21, 0, 0).unwrap();

        let early = ctx.store.create_session(&NewSession::ended(&habit.id, morning, Duration::minutes(30))).await.unwrap();
        let late = ctx.store.create_session(&NewSession::ended(&habit.id, evening, Duration::minutes(15))).await.unwrap();

        assert_eq!(early.start, Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        assert_ne!(early.id, late.id);

        let sessions = ctx.store.list_sessions(&habit.id).await.unwrap();
        assert_eq!(sessions, vec![late, early]);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_delete_removes_sessions(ctx: &mut StoreTestContext) {
        let habit = ctx.store.create(&reading()).await.unwrap();
        let other = ctx.store.create(&HabitDraft::new("Exercise", 9, "45 mins/day")).await.unwrap();
        let end = Utc::now();
        ctx.store.create_session(&NewSession::ended(&habit.id, end, Duration::minutes(5))).await.unwrap();
        ctx.store.create_session(&NewSession::ended(&other.id, end, Duration::minutes(5))).await.unwrap();

        ctx.store.delete(&habit.id).await.unwrap();

        assert!(ctx.store.get(&habit.id).await.unwrap().is_none());
        assert!(ctx.store.list_sessions(&habit.id).await.unwrap().is_empty());
        assert_eq!(ctx.store.session_count().unwrap(), 1);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_session_for_unknown_habit_is_rejected(ctx: &mut StoreTestContext) {
        let result = ctx.store.create_session(&NewSession::ended("missing", Utc::now(), Duration::minutes(5))).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_data_survives_reopen(ctx: &mut StoreTestContext) {
        let habit = ctx.store.create(&reading()).await.unwrap();
        ctx.store.update(&habit.id, &HabitUpdate::time_spent(Duration::minutes(20))).await.unwrap();

        let reopened = LocalStore::open(&ctx.db_path).unwrap();
        let habits = reopened.list().await.unwrap();

        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].time_spent, Duration::minutes(20));
    }
}
