#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use habitual::api::remote::{RemoteConfig, RemoteStore};
    use habitual::libs::habit::{HabitDraft, HabitUpdate};
    use habitual::libs::repository::{HabitRepository, StoreError};
    use habitual::libs::session::NewSession;
    use mockito::{Matcher, ServerGuard};
    use serde_json::json;
    use test_context::{test_context, AsyncTestContext};

    struct RemoteTestContext {
        server: ServerGuard,
        store: RemoteStore,
    }

    impl AsyncTestContext for RemoteTestContext {
        async fn setup() -> Self {
            let server = mockito::Server::new_async().await;
            let store = RemoteStore::new(&RemoteConfig {
                api_url: format!("{}/", server.url()),
                api_key: "anon-key".to_string(),
                access_token: Some("user-token".to_string()),
                user_id: Some("user-1".to_string()),
            });
            RemoteTestContext { server, store }
        }
    }

    fn habit_row(id: &str, name: &str, time_spent: i64) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": "user-1",
            "name": name,
            "description": "Daily reading",
            "importance": 8,
            "goal": "1 hour/day",
            "resources": ["Local library"],
            "time_spent": time_spent,
            "color": "#2563eb",
            "created_at": "2025-03-01T09:00:00.123456+00:00",
            "updated_at": "2025-03-01T10:00:00+00:00"
        })
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_list_sends_credentials_and_parses_rows(ctx: &mut RemoteTestContext) {
        let body = json!([habit_row("h2", "Exercise", 0), habit_row("h1", "Reading", 1_800_000)]);
        let mock = ctx
            .server
            .mock("GET", "/rest/v1/habits")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "*".into()),
                Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
            ]))
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer user-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let habits = ctx.store.list().await.unwrap();

        mock.assert_async().await;
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "Exercise");
        assert_eq!(habits[1].time_spent, Duration::minutes(30));
        assert_eq!(habits[1].progress(), 50.0);
        assert_eq!(habits[1].updated_at, Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap());
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_create_posts_snake_case_row(ctx: &mut RemoteTestContext) {
        let mock = ctx
            .server
            .mock("POST", "/rest/v1/habits")
            .match_header("prefer", "return=representation")
            .match_body(Matcher::PartialJson(json!({
                "user_id": "user-1",
                "name": "Reading",
                "importance": 8,
                "goal": "1 hour/day",
                "time_spent": 0,
                "resources": ["Local library"]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!([habit_row("h1", "Reading", 0)]).to_string())
            .create_async()
            .await;

        let draft = HabitDraft::new("Reading", 8, "1 hour/day").with_resources(vec!["Local library".to_string()]);
        let habit = ctx.store.create(&draft).await.unwrap();

        mock.assert_async().await;
        assert_eq!(habit.id, "h1");
        assert_eq!(habit.importance, 8);
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_update_patches_only_given_fields(ctx: &mut RemoteTestContext) {
        let mock = ctx
            .server
            .mock("PATCH", "/rest/v1/habits")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.h1".into()))
            .match_body(Matcher::PartialJson(json!({ "time_spent": 5000 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([habit_row("h1", "Reading", 5000)]).to_string())
            .create_async()
            .await;

        let habit = ctx.store.update("h1", &HabitUpdate::time_spent(Duration::milliseconds(5000))).await.unwrap();

        mock.assert_async().await;
        assert_eq!(habit.time_spent, Duration::milliseconds(5000));
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found(ctx: &mut RemoteTestContext) {
        ctx.server
            .mock("PATCH", "/rest/v1/habits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let result = ctx.store.update("gone", &HabitUpdate::time_spent(Duration::seconds(1))).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_status_codes_map_to_errors(ctx: &mut RemoteTestContext) {
        ctx.server
            .mock("GET", "/rest/v1/habits")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"message":"JWT expired"}"#)
            .create_async()
            .await;
        ctx.server
            .mock("GET", "/rest/v1/habit_sessions")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        match ctx.store.list().await {
            Err(StoreError::Unauthorized(message)) => assert!(message.contains("JWT expired")),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        match ctx.store.list_sessions("h1").await {
            Err(StoreError::Request { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Request, got {:?}", other),
        }
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_malformed_body_is_a_json_error(ctx: &mut RemoteTestContext) {
        ctx.server
            .mock("GET", "/rest/v1/habits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"not":"a list"}"#)
            .create_async()
            .await;

        assert!(matches!(ctx.store.list().await, Err(StoreError::Json(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_connectivity_error() {
        let store = RemoteStore::new(&RemoteConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            api_key: "anon-key".to_string(),
            access_token: None,
            user_id: None,
        });

        assert!(matches!(store.list().await, Err(StoreError::Connectivity(_))));
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_sessions_round_trip(ctx: &mut RemoteTestContext) {
        let end = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 5).unwrap();
        let row = json!({
            "id": "s1",
            "user_id": "user-1",
            "habit_id": "h1",
            "start_time": "2025-03-01T09:00:00+00:00",
            "end_time": "2025-03-01T09:00:05+00:00",
            "duration": 5000,
            "is_active": false
        });
        let create = ctx
            .server
            .mock("POST", "/rest/v1/habit_sessions")
            .match_body(Matcher::PartialJson(json!({
                "habit_id": "h1",
                "duration": 5000,
                "is_active": false
            })))
            .with_status(201)
            .with_body(json!([row]).to_string())
            .create_async()
            .await;
        let list = ctx
            .server
            .mock("GET", "/rest/v1/habit_sessions")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("habit_id".into(), "eq.h1".into()),
                Matcher::UrlEncoded("order".into(), "start_time.desc".into()),
            ]))
            .with_status(200)
            .with_body(json!([row]).to_string())
            .create_async()
            .await;

        let session = ctx.store.create_session(&NewSession::ended("h1", end, Duration::seconds(5))).await.unwrap();
        let sessions = ctx.store.list_sessions("h1").await.unwrap();

        create.assert_async().await;
        list.assert_async().await;
        assert_eq!(session.start, Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        assert_eq!(session.end, Some(end));
        assert_eq!(session.duration, Duration::seconds(5));
        assert_eq!(sessions, vec![session]);
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_delete_removes_habit_then_sessions(ctx: &mut RemoteTestContext) {
        let habit = ctx
            .server
            .mock("DELETE", "/rest/v1/habits")
            .match_query(Matcher::UrlEncoded("id".into(), "eq.h1".into()))
            .match_header("prefer", "return=representation")
            .with_status(200)
            .with_body(json!([habit_row("h1", "Reading", 0)]).to_string())
            .create_async()
            .await;
        let sessions = ctx
            .server
            .mock("DELETE", "/rest/v1/habit_sessions")
            .match_query(Matcher::UrlEncoded("habit_id".into(), "eq.h1".into()))
            .with_status(204)
            .create_async()
            .await;

        ctx.store.delete("h1").await.unwrap();

        habit.assert_async().await;
        sessions.assert_async().await;
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_delete_of_missing_habit_is_not_found(ctx: &mut RemoteTestContext) {
        ctx.server
            .mock("DELETE", "/rest/v1/habits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let sessions = ctx
            .server
            .mock("DELETE", "/rest/v1/habit_sessions")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = ctx.store.delete("gone").await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        sessions.assert_async().await;
    }

    #[test_context(RemoteTestContext)]
    #[tokio::test]
    async fn test_failed_session_cleanup_still_deletes(ctx: &mut RemoteTestContext) {
        ctx.server
            .mock("DELETE", "/rest/v1/habits")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!([habit_row("h1", "Reading", 0)]).to_string())
            .create_async()
            .await;
        ctx.server
            .mock("DELETE", "/rest/v1/habit_sessions")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        assert!(ctx.store.delete("h1").await.is_ok());
    }
}
