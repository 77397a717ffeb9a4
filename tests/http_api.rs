use std::{collections::HashSet, sync::Arc, time::Duration};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use futures::{FutureExt, future::BoxFuture};
use serde_json::{Value, json};
use tower::ServiceExt;

use word_wheel_back::{
    config::AppConfig,
    dao::{
        game_store::{GameStore, MemoryStore},
        models::{ParticipantEntity, QuestionEntity, RoundStateEntity, TeamEntity, TimerTable},
        storage::{StorageError, StorageResult},
    },
    routes,
    state::AppState,
};

async fn app_with(store: impl GameStore + 'static) -> Router {
    let config = AppConfig::default().with_round_duration(Duration::from_secs(45));
    let state = AppState::bootstrap(config, Arc::new(store)).await.unwrap();
    routes::router(state)
}

/// Memory store whose round-state table refuses writes.
struct FrozenWheel(MemoryStore);

impl GameStore for FrozenWheel {
    fn load_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        self.0.load_teams()
    }

    fn load_questions(&self) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        self.0.load_questions()
    }

    fn save_questions(&self, questions: Vec<QuestionEntity>) -> BoxFuture<'static, StorageResult<()>> {
        self.0.save_questions(questions)
    }

    fn load_participants(&self) -> BoxFuture<'static, StorageResult<Vec<ParticipantEntity>>> {
        self.0.load_participants()
    }

    fn save_participants(
        &self,
        participants: Vec<ParticipantEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        self.0.save_participants(participants)
    }

    fn load_round_state(&self) -> BoxFuture<'static, StorageResult<Option<RoundStateEntity>>> {
        self.0.load_round_state()
    }

    fn save_round_state(&self, _state: RoundStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        async {
            Err(StorageError::unavailable(
                "round state is read-only".into(),
                std::io::Error::other("read-only volume"),
            ))
        }
        .boxed()
    }

    fn load_timers(&self) -> BoxFuture<'static, StorageResult<TimerTable>> {
        self.0.load_timers()
    }

    fn save_timers(&self, timers: TimerTable) -> BoxFuture<'static, StorageResult<()>> {
        self.0.save_timers(timers)
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        self.0.health_check()
    }
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn wheel_draws_every_team_once_then_resets() {
    let app = app_with(MemoryStore::with_teams(["Red", "Blue", "Green", "Feedback"])).await;

    let (status, body) = call(&app, "POST", "/admin/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, left) = call(&app, "GET", "/api/teams_left", None).await;
    assert_eq!(left, json!(["Red", "Blue", "Green"]));

    let mut drawn = HashSet::new();
    for _ in 0..3 {
        let (status, body) = call(&app, "POST", "/api/spin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["round_reset"], json!(false));
        let team = body["team"].as_str().unwrap().to_string();
        assert!(drawn.insert(team));
    }
    assert!(!drawn.contains("Feedback"));

    let (_, left) = call(&app, "GET", "/api/teams_left", None).await;
    assert_eq!(left, json!([]));

    let (_, body) = call(&app, "POST", "/api/spin", None).await;
    assert_eq!(body, json!({"round_reset": true, "round": 2}));

    let (_, status_body) = call(&app, "GET", "/game-status", None).await;
    assert_eq!(status_body, json!({"started": true, "round": 2}));

    let (_, body) = call(&app, "POST", "/api/reset", None).await;
    assert_eq!(body, json!({"status": "reset"}));
    let (_, status_body) = call(&app, "GET", "/game-status", None).await;
    assert_eq!(status_body, json!({"started": false, "round": 1}));
}

#[tokio::test]
async fn remove_team_validates_and_shrinks_pool() {
    let app = app_with(MemoryStore::with_teams(["Red", "Blue"])).await;
    call(&app, "POST", "/admin/start", None).await;

    let (status, body) = call(&app, "POST", "/api/remove_team", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing team"}));

    let (status, body) =
        call(&app, "POST", "/api/remove_team", Some(json!({"team": "Red"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "removed"}));

    let (_, left) = call(&app, "GET", "/api/teams_left", None).await;
    assert_eq!(left, json!(["Blue"]));
}

#[tokio::test]
async fn team_list_flags_excluded_entries() {
    let app = app_with(MemoryStore::with_teams(["Red", "Team Feedback"])).await;
    let (_, body) = call(&app, "GET", "/api/teams", None).await;
    assert_eq!(
        body,
        json!([
            {"team_name": "Red", "excluded": false},
            {"team_name": "Team Feedback", "excluded": true},
        ])
    );
}

#[tokio::test]
async fn timer_starts_lazily_and_resets() {
    let app = app_with(MemoryStore::default()).await;

    let (status, body) = call(&app, "GET", "/api/time_left/Red", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"time_left": 45}));

    let (_, again) = call(&app, "GET", "/api/time_left/Red", None).await;
    assert!(again["time_left"].as_u64().unwrap() <= 45);

    let (status, body) = call(&app, "POST", "/api/reset_timer/Red", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "reset", "team": "Red"}));
}

#[tokio::test]
async fn team_question_is_split_into_words() {
    let store = MemoryStore::with_teams(["Red"]);
    store
        .set_questions(vec![QuestionEntity {
            team: "Red".into(),
            question: "where do rivers go".into(),
        }])
        .await;
    let app = app_with(store).await;

    let (status, body) = call(&app, "GET", "/api/team_question/Red", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["words_pool"], json!(["where", "do", "rivers", "go"]));
    assert_eq!(body["question"], json!("where do rivers go"));

    let (status, body) = call(&app, "GET", "/api/team_question/Blue", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No question found for Blue"}));
}

#[tokio::test]
async fn registration_and_role_lookup() {
    let app = app_with(MemoryStore::default()).await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        Some(json!({"name": "Ada", "team_name": "Red", "team_role": "Leader", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "registered", "role": "admin", "next": "/admin"})
    );

    let (_, body) = call(
        &app,
        "GET",
        "/api/role?name=Ada&team=Red&team_role=Leader",
        None,
    )
    .await;
    assert_eq!(body, json!({"role": "admin"}));

    let (_, body) = call(&app, "GET", "/api/role?name=Bob", None).await;
    assert_eq!(body, json!({"role": "participant"}));

    let (status, body) = call(
        &app,
        "POST",
        "/api/register",
        Some(json!({"name": "Ada", "team_name": "", "team_role": "Leader", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn healthcheck_reports_connections() {
    let app = app_with(MemoryStore::default()).await;
    let (status, body) = call(&app, "GET", "/healthcheck", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["connected_clients"], json!(0));
}

#[tokio::test]
async fn spin_reports_unavailable_storage_without_drawing() {
    let app = app_with(FrozenWheel(MemoryStore::with_teams(["Red", "Blue"]))).await;

    let (status, body) = call(&app, "POST", "/api/spin", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().starts_with("service unavailable"));

    let (_, left) = call(&app, "GET", "/api/teams_left", None).await;
    assert_eq!(left, json!(["Red", "Blue"]));
    let (_, status_body) = call(&app, "GET", "/game-status", None).await;
    assert_eq!(status_body, json!({"started": false, "round": 1}));
}
