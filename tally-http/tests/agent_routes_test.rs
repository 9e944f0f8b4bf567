//! Integration tests for the agent API surface.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tally_http::routes::create_agent_router;

async fn post_task(body: Value) -> (StatusCode, Value) {
    let app = create_agent_router();
    let request = Request::builder()
        .uri("/task")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = create_agent_router();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_task_evaluates_expression() {
    let (status, body) = post_task(json!({"id": "task-1", "expression": "5+3"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "task-1");
    assert_eq!(body["result"], 8.0);
}

#[tokio::test]
async fn test_task_respects_precedence() {
    let (status, body) = post_task(json!({"id": "task-2", "expression": "10/2 + 3*4"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], 17.0);
}

#[tokio::test]
async fn test_task_reports_division_by_zero() {
    let (status, body) = post_task(json!({"id": "task-3", "expression": "5/0"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["id"], "task-3");
    assert_eq!(body["error"]["kind"], "division_by_zero");
}

#[tokio::test]
async fn test_task_reports_missing_close_paren() {
    let (status, body) = post_task(json!({"id": "task-4", "expression": "sqrt(16"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "missing_close_paren");
}

#[tokio::test]
async fn test_task_reports_syntax_error_on_bad_character() {
    let (status, body) = post_task(json!({"id": "task-5", "expression": "2$3"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "syntax_error");
}

#[tokio::test]
async fn test_task_reports_empty_expression() {
    let (status, body) = post_task(json!({"id": "task-6", "expression": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "unexpected_end_of_input");
}

#[tokio::test]
async fn test_task_reports_unknown_function() {
    let (status, body) = post_task(json!({"id": "task-7", "expression": "tan(1)"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["kind"], "unknown_function");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("tan"));
}
