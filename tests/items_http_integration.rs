//! Integration tests for the per-user item endpoints and the SPA fallback.
//!
//! Every item table shares one set of routes, so most flows run against
//! tasks and habits; a smoke test covers the other tables.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use planboard::adapters::{app_router, AppServices};
use planboard::config::AppConfig;
use planboard::domain::user::MIN_BCRYPT_COST;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    _static_dir: TempDir,
}

struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    text: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body should be JSON")
    }
}

fn test_app() -> TestApp {
    let static_dir = TempDir::new().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<html>planboard</html>").unwrap();

    let mut config = AppConfig::default();
    config.auth.bcrypt_cost = MIN_BCRYPT_COST;
    config.server.static_dir = static_dir.path().to_path_buf();

    TestApp {
        router: app_router(&AppServices::in_memory(), &config),
        _static_dir: static_dir,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            content_type,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Signs up a fresh account and returns its session cookie.
    async fn login_as(&self, email: &str) -> String {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"email": email, "password": "pw"}).to_string()))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|c| c.split(';').next())
            .expect("signup should set a session cookie")
            .to_string()
    }
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn anonymous_list_returns_empty_array_with_401() {
    let app = test_app();
    let response = app.send(Method::GET, "/api/tasks", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn anonymous_mutations_are_unauthorized() {
    let app = test_app();
    let cases = [
        (Method::POST, "/api/tasks", Some(json!({"text": "x"}))),
        (Method::PUT, "/api/tasks/1", Some(json!({"text": "x"}))),
        (Method::DELETE, "/api/tasks/1", None),
    ];
    for (method, uri, body) in cases {
        let response = app.send(method, uri, None, body).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(response.json(), json!({"error": "Unauthorized"}));
    }
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn task_lifecycle() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;

    let created = app
        .send(
            Method::POST,
            "/api/tasks",
            Some(&cookie),
            Some(json!({"id": 1700000000000u64, "text": "Write report", "user_id": "someone-else"})),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json(), json!({"success": true, "id": "1700000000000"}));

    let listed = app.send(Method::GET, "/api/tasks", Some(&cookie), None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let tasks = listed.json();
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["id"], json!("1700000000000"));
    assert_eq!(tasks[0]["text"], json!("Write report"));
    assert_eq!(tasks[0]["status"], json!("NOT STARTED"));
    assert_eq!(tasks[0]["tags"], json!([]));
    assert!(tasks[0].get("user_id").is_none());

    let updated = app
        .send(
            Method::PUT,
            "/api/tasks/1700000000000",
            Some(&cookie),
            Some(json!({"status": "DONE", "tags": ["work"]})),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json(), json!({"success": true}));

    let tasks = app.send(Method::GET, "/api/tasks", Some(&cookie), None).await.json();
    assert_eq!(tasks[0]["status"], json!("DONE"));
    assert_eq!(tasks[0]["tags"], json!(["work"]));
    assert_eq!(tasks[0]["text"], json!("Write report"));

    let deleted = app
        .send(Method::DELETE, "/api/tasks/1700000000000", Some(&cookie), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), json!({"success": true}));

    let tasks = app.send(Method::GET, "/api/tasks", Some(&cookie), None).await.json();
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn missing_id_is_generated() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;

    let created = app
        .send(Method::POST, "/api/goals", Some(&cookie), Some(json!({"text": "Run a marathon"})))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.json()["id"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
}

#[tokio::test]
async fn every_table_accepts_items() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;

    for table in ["tasks", "goals", "reminders", "habits"] {
        let uri = format!("/api/{table}");
        let created = app
            .send(Method::POST, &uri, Some(&cookie), Some(json!({"id": "a1", "text": table})))
            .await;
        assert_eq!(created.status, StatusCode::OK, "{table}");

        let listed = app.send(Method::GET, &uri, Some(&cookie), None).await.json();
        assert_eq!(listed.as_array().unwrap().len(), 1, "{table}");
        assert_eq!(listed[0]["text"], json!(table));
    }
}

#[tokio::test]
async fn duplicate_id_conflicts() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;
    let body = json!({"id": "dup", "text": "once"});

    app.send(Method::POST, "/api/reminders", Some(&cookie), Some(body.clone())).await;
    let response = app.send(Method::POST, "/api/reminders", Some(&cookie), Some(body)).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json(), json!({"error": "Item already exists"}));
}

#[tokio::test]
async fn invalid_payloads_are_bad_requests() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;

    let not_object = app
        .send(Method::POST, "/api/tasks", Some(&cookie), Some(json!(["text"])))
        .await;
    assert_eq!(not_object.status, StatusCode::BAD_REQUEST);

    let missing_text = app
        .send(Method::POST, "/api/tasks", Some(&cookie), Some(json!({"note": "no text"})))
        .await;
    assert_eq!(missing_text.status, StatusCode::BAD_REQUEST);

    let wrong_type = app
        .send(Method::POST, "/api/habits", Some(&cookie), Some(json!({"text": "a", "streak": "many"})))
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);

    let nul_text = app
        .send(Method::POST, "/api/tasks", Some(&cookie), Some(json!({"text": "a\u{0000}b"})))
        .await;
    assert_eq!(nul_text.status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tasks")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_missing_item_is_not_found() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;

    let response = app
        .send(Method::PUT, "/api/goals/nope", Some(&cookie), Some(json!({"text": "x"})))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"error": "Not found"}));
}

// =============================================================================
// Isolation between users
// =============================================================================

#[tokio::test]
async fn users_cannot_see_or_touch_each_others_items() {
    let app = test_app();
    let alice = app.login_as("alice@example.com").await;
    let bob = app.login_as("bob@example.com").await;

    app.send(Method::POST, "/api/tasks", Some(&alice), Some(json!({"id": "t1", "text": "private"})))
        .await;

    let bob_list = app.send(Method::GET, "/api/tasks", Some(&bob), None).await;
    assert_eq!(bob_list.json(), json!([]));

    let update = app
        .send(Method::PUT, "/api/tasks/t1", Some(&bob), Some(json!({"text": "hijacked"})))
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);

    let delete = app.send(Method::DELETE, "/api/tasks/t1", Some(&bob), None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let alice_list = app.send(Method::GET, "/api/tasks", Some(&alice), None).await.json();
    assert_eq!(alice_list[0]["text"], json!("private"));
}

// =============================================================================
// Habits
// =============================================================================

#[tokio::test]
async fn habit_streak_follows_completions() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;
    let today = Utc::now().date_naive();
    let day = |offset: i64| (today - Duration::days(offset)).format("%Y-%m-%d").to_string();

    app.send(Method::POST, "/api/habits", Some(&cookie), Some(json!({"id": "h1", "text": "Read"})))
        .await;
    let habits = app.send(Method::GET, "/api/habits", Some(&cookie), None).await.json();
    assert_eq!(habits[0]["streak"], json!(0));
    assert_eq!(habits[0]["completions"], json!([]));

    let completions = json!([
        {"date": day(0), "completed": true},
        {"date": day(1), "completed": true},
        {"date": day(3), "completed": true},
    ]);
    app.send(
        Method::PUT,
        "/api/habits/h1",
        Some(&cookie),
        Some(json!({"completions": completions})),
    )
    .await;

    let habits = app.send(Method::GET, "/api/habits", Some(&cookie), None).await.json();
    assert_eq!(habits[0]["streak"], json!(2));
}

// =============================================================================
// Static files
// =============================================================================

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let app = test_app();
    let response = app.send(Method::GET, "/api/nothing-here", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"error": "Not found"}));
}

#[tokio::test]
async fn client_routes_serve_index_html() {
    let app = test_app();
    let response = app.send(Method::GET, "/dashboard/today", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.unwrap().starts_with("text/html"));
    assert_eq!(response.text, "<html>planboard</html>");
}

#[tokio::test]
async fn api_prefixed_paths_never_fall_through_to_the_client_app() {
    let app = test_app();
    for path in ["/api", "/apiary", "/api-docs"] {
        let response = app.send(Method::GET, path, None, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.json(), json!({"error": "Not found"}), "{path}");
    }
}

#[tokio::test]
async fn unsupported_method_on_api_route_is_json_404() {
    let app = test_app();
    let cookie = app.login_as("alice@example.com").await;
    let cases = [
        (Method::GET, "/api/tasks/1"),
        (Method::GET, "/api/logout"),
        (Method::GET, "/api/signup"),
        (Method::GET, "/api/login"),
        (Method::POST, "/api/check-auth"),
        (Method::PATCH, "/api/habits"),
    ];
    for (method, path) in cases {
        let response = app.send(method.clone(), path, Some(&cookie), None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {path}");
        assert_eq!(response.json(), json!({"error": "Not found"}), "{method} {path}");
    }
}
