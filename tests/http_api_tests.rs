// Integration tests for the HTTP control API, driven through the router
// without a live socket.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chefmentor_live::{create_router, AppState};
use common::{RecordingSpeech, ScriptedChat};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_router() -> Router {
    let chat = Arc::new(ScriptedChat::new("Use medium-low heat."));
    let speech = Arc::new(RecordingSpeech::new());
    create_router(AppState::new(chat, speech))
}

async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request builds"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).to_string(),
        ))
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let router = test_router();
    let (status, body) = request(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_full_session_flow() {
    let router = test_router();

    // Start with the demo recipe
    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/start",
        Some(json!({"session_id": "test-session"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["step"]["step_number"], 1);
    assert_eq!(body["step"]["total_steps"], 5);
    assert_eq!(body["step"]["title"], "Preparation");

    // Advance and come back
    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/test-session/advance",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step_number"], 2);

    let (_, body) = request(&router, Method::POST, "/sessions/test-session/back", None).await;
    assert_eq!(body["step_number"], 1);

    // A transcribed voice command sets the timer
    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/test-session/command",
        Some(json!({"text": "set a timer for 5 minutes"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"]["intent"], "TIMER");
    assert_eq!(body["intent"]["duration_seconds"], 300);
    assert_eq!(body["feedback"], "Timer set: 5m");

    let (_, body) = request(&router, Method::GET, "/sessions/test-session/status", None).await;
    let remaining = body["remaining_seconds"].as_u64().expect("remaining");
    assert!((295..=300).contains(&remaining), "countdown loaded from the command");
    assert_eq!(body["timer_running"], true);

    // Ask the mentor a question
    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/test-session/chat",
        Some(json!({"message": "Is this right?"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Use medium-low heat.");

    let (_, body) = request(
        &router,
        Method::GET,
        "/sessions/test-session/transcript",
        None,
    )
    .await;
    let transcript = body.as_array().expect("transcript is a list");
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0]["role"], "user");
    assert_eq!(transcript[1]["role"], "assistant");

    // Pause freezes, restart goes back to step one
    let (_, body) = request(
        &router,
        Method::POST,
        "/sessions/test-session/pause",
        Some(json!({"paused": true})),
    )
    .await;
    assert_eq!(body["paused"], true);

    let (_, body) = request(
        &router,
        Method::POST,
        "/sessions/test-session/restart",
        None,
    )
    .await;
    assert_eq!(body["step_number"], 1);

    // Stop tears the session down
    let (status, body) = request(&router, Method::POST, "/sessions/test-session/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["stats"]["transcript_len"], 2);

    let (status, _) = request(&router, Method::GET, "/sessions/test-session/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_starting_the_same_session_twice_conflicts() {
    let router = test_router();

    let (status, _) = request(
        &router,
        Method::POST,
        "/sessions/start",
        Some(json!({"session_id": "dup"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/start",
        Some(json!({"session_id": "dup"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already active"));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let router = test_router();

    let (status, _) = request(&router, Method::GET, "/sessions/nope/status", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(&router, Method::POST, "/sessions/nope/advance", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_recipe_is_a_bad_request() {
    let router = test_router();

    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/start",
        Some(json!({"recipe": {"name": "Nothing", "steps": []}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no steps"));
}

#[tokio::test]
async fn test_custom_recipe_completes_on_final_advance() {
    let router = test_router();

    let recipe = json!({
        "name": "Toast",
        "steps": [{
            "title": "Toast it",
            "instruction": "Put the bread in the toaster.",
            "timer_seconds": 90,
            "tip": "Watch the edges."
        }]
    });
    let (status, body) = request(
        &router,
        Method::POST,
        "/sessions/start",
        Some(json!({"session_id": "toast", "recipe": recipe})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"]["is_last_step"], true);

    let (_, body) = request(&router, Method::POST, "/sessions/toast/advance", None).await;
    assert_eq!(body["completed"], true);
    assert_eq!(body["step_number"], 1, "the index never moves past bounds");
}
