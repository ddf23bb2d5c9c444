#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use habitual::db::store::LocalStore;
    use habitual::libs::clock::{Clock, ManualClock};
    use habitual::libs::habit::{Habit, HabitDraft, HabitUpdate};
    use habitual::libs::repository::{HabitRepository, Result, StoreError};
    use habitual::libs::session::{NewSession, Session};
    use habitual::libs::timer::{ArmOutcome, StartOutcome, StopOutcome, Timer, TimerError, TimerState};
    use habitual::libs::timer_store::TimerFile;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct TimerTestContext {
        temp_dir: TempDir,
        store: LocalStore,
        reading: Habit,
        exercise: Habit,
        clock: ManualClock,
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    impl AsyncTestContext for TimerTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = LocalStore::open(temp_dir.path().join("habitual.db")).unwrap();
            let reading = store.create(&HabitDraft::new("Reading", 8, "1 hour/day")).await.unwrap();
            let exercise = store.create(&HabitDraft::new("Exercise", 9, "45 mins/day")).await.unwrap();

            TimerTestContext {
                temp_dir,
                store,
                reading,
                exercise,
                clock: ManualClock::new(t0()),
            }
        }
    }

    /// Wraps a store and makes selected operations fail.
    struct Flaky<'a> {
        inner: &'a LocalStore,
        fail_sessions: bool,
        fail_updates: bool,
        hide_habits: bool,
    }

    impl<'a> Flaky<'a> {
        fn new(inner: &'a LocalStore) -> Self {
            Self {
                inner,
                fail_sessions: false,
                fail_updates: false,
                hide_habits: false,
            }
        }
    }

    impl HabitRepository for Flaky<'_> {
        async fn create(&self, draft: &HabitDraft) -> Result<Habit> {
            self.inner.create(draft).await
        }

        async fn update(&self, id: &str, update: &HabitUpdate) -> Result<Habit> {
            if self.fail_updates {
                return Err(StoreError::Connectivity("connection reset".to_string()));
            }
            self.inner.update(id, update).await
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.inner.delete(id).await
        }

        async fn list(&self) -> Result<Vec<Habit>> {
            if self.hide_habits {
                return Ok(Vec::new());
            }
            self.inner.list().await
        }

        async fn create_session(&self, session: &NewSession) -> Result<Session> {
            if self.fail_sessions {
                return Err(StoreError::Unauthorized("JWT expired".to_string()));
            }
            self.inner.create_session(session).await
        }

        async fn list_sessions(&self, habit_id: &str) -> Result<Vec<Session>> {
            self.inner.list_sessions(habit_id).await
        }
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_stop_records_session_and_adds_time(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        assert_eq!(timer.start(&ctx.reading.id), StartOutcome::Started);
        ctx.clock.advance(Duration::milliseconds(5000));

        let outcome = timer.stop(&ctx.store).await.unwrap();

        let StopOutcome::Recorded { session, habit } = outcome else {
            panic!("expected a recorded session");
        };
        assert_eq!(session.habit_id, ctx.reading.id);
        assert_eq!(session.duration, Duration::milliseconds(5000));
        assert_eq!(session.start, t0());
        assert_eq!(session.end, Some(t0() + Duration::milliseconds(5000)));
        assert!(!session.active);
        assert_eq!(habit.unwrap().time_spent, Duration::milliseconds(5000));
        assert!(timer.state().is_idle());

        let stored = ctx.store.list_sessions(&ctx.reading.id).await.unwrap();
        assert_eq!(stored, vec![session]);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_elapsed_time_adds_up_over_pauses(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);

        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::seconds(2));
        assert_eq!(timer.pause(), Some(Duration::seconds(2)));

        // Time while paused does not count.
        ctx.clock.advance(Duration::minutes(10));
        assert_eq!(timer.tick(), Duration::seconds(2));

        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::seconds(3));
        assert_eq!(timer.tick(), Duration::seconds(5));

        let StopOutcome::Recorded { session, .. } = timer.stop(&ctx.store).await.unwrap() else {
            panic!("expected a recorded session");
        };
        assert_eq!(session.duration, Duration::seconds(5));
        assert_eq!(session.end, Some(ctx.clock.now()));
        assert_eq!(session.start, ctx.clock.now() - Duration::seconds(5));
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_tick_is_a_pure_read(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::milliseconds(1500));

        let before = timer.snapshot();
        let first = timer.tick();
        let second = timer.tick();

        assert_eq!(first, Duration::milliseconds(1500));
        assert_eq!(first, second);
        assert_eq!(timer.snapshot(), before);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_stop_without_time_records_nothing(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        assert_eq!(timer.stop(&ctx.store).await.unwrap(), StopOutcome::Empty);

        assert_eq!(timer.select_and_arm(&ctx.reading.id), ArmOutcome::Armed);
        assert_eq!(timer.stop(&ctx.store).await.unwrap(), StopOutcome::Empty);
        assert!(timer.state().is_idle());

        assert_eq!(ctx.store.session_count().unwrap(), 0);
        let reading = ctx.store.get(&ctx.reading.id).await.unwrap().unwrap();
        assert_eq!(reading.time_spent, Duration::zero());
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_failed_session_save_keeps_time_for_retry(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::seconds(5));

        let mut flaky = Flaky::new(&ctx.store);
        flaky.fail_sessions = true;
        let err = timer.stop(&flaky).await.unwrap_err();

        assert!(matches!(err, TimerError::SessionNotSaved { elapsed_ms: 5000, .. }));
        assert!(!timer.state().is_running());
        assert_eq!(timer.state().selected_habit_id(), Some(ctx.reading.id.as_str()));
        assert_eq!(timer.state().elapsed(), Duration::seconds(5));
        assert_eq!(ctx.store.session_count().unwrap(), 0);

        // Time passing after the failure is not added.
        ctx.clock.advance(Duration::seconds(30));
        flaky.fail_sessions = false;
        let StopOutcome::Recorded { session, habit } = timer.stop(&flaky).await.unwrap() else {
            panic!("expected a recorded session");
        };
        assert_eq!(session.duration, Duration::seconds(5));
        assert_eq!(habit.unwrap().time_spent, Duration::seconds(5));
        assert!(timer.state().is_idle());
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_failed_total_update_reports_saved_session(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::seconds(8));

        let mut flaky = Flaky::new(&ctx.store);
        flaky.fail_updates = true;
        let err = timer.stop(&flaky).await.unwrap_err();

        let TimerError::HabitNotUpdated { session, .. } = err else {
            panic!("expected HabitNotUpdated");
        };
        assert_eq!(session.duration, Duration::seconds(8));
        assert!(timer.state().is_idle());
        assert_eq!(ctx.store.session_count().unwrap(), 1);
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_stop_for_vanished_habit_still_records(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::seconds(4));

        let mut flaky = Flaky::new(&ctx.store);
        flaky.hide_habits = true;

        let StopOutcome::Recorded { session, habit } = timer.stop(&flaky).await.unwrap() else {
            panic!("expected a recorded session");
        };
        assert_eq!(session.duration, Duration::seconds(4));
        assert!(habit.is_none());
        assert!(timer.state().is_idle());
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_timer_tracks_one_habit_at_a_time(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        let started_at = timer.state().start_time();

        ctx.clock.advance(Duration::seconds(1));
        assert_eq!(timer.start(&ctx.reading.id), StartOutcome::AlreadyRunning);
        assert_eq!(timer.state().start_time(), started_at);

        let busy = StartOutcome::Busy { habit_id: ctx.reading.id.clone() };
        assert_eq!(timer.start(&ctx.exercise.id), busy);
        assert_eq!(
            timer.select_and_arm(&ctx.exercise.id),
            ArmOutcome::Busy { habit_id: ctx.reading.id.clone() }
        );

        // Paused time still belongs to the first habit.
        timer.pause();
        assert_eq!(timer.start(&ctx.exercise.id), busy);

        // Arming another habit explicitly discards it.
        assert_eq!(timer.select_and_arm(&ctx.exercise.id), ArmOutcome::Armed);
        assert_eq!(timer.state().elapsed(), Duration::zero());
        assert_eq!(timer.start(&ctx.exercise.id), StartOutcome::Started);
        assert_eq!(timer.state().selected_habit_id(), Some(ctx.exercise.id.as_str()));
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_timer_resumes_from_saved_snapshot(ctx: &mut TimerTestContext) {
        let file = TimerFile::at(ctx.temp_dir.path().join("timer.json"));
        assert_eq!(file.load().unwrap(), TimerState::default());

        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::seconds(3));
        file.save(timer.state()).unwrap();

        // A later invocation picks the running timer up again.
        ctx.clock.advance(Duration::seconds(2));
        let mut resumed = Timer::with_state(file.load().unwrap(), &ctx.clock);
        assert!(resumed.state().is_running());
        assert_eq!(resumed.tick(), Duration::seconds(5));

        resumed.stop(&ctx.store).await.unwrap();
        file.save(resumed.state()).unwrap();
        assert!(!ctx.temp_dir.path().join("timer.json").exists());
        assert_eq!(file.load().unwrap(), TimerState::default());
    }

    #[test_context(TimerTestContext)]
    #[tokio::test]
    async fn test_live_progress_includes_unsaved_time(ctx: &mut TimerTestContext) {
        let mut timer = Timer::new(&ctx.clock);
        timer.start(&ctx.reading.id);
        ctx.clock.advance(Duration::minutes(30));

        assert_eq!(timer.live_progress(&ctx.reading), 50.0);
        assert_eq!(timer.live_progress(&ctx.exercise), 0.0);

        ctx.clock.advance(Duration::minutes(90));
        assert_eq!(timer.live_progress(&ctx.reading), 100.0);
    }
}
