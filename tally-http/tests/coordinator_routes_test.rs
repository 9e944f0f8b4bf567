//! Integration tests for the coordinator API surface.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use tally_core::expression_store::{ExpressionStatus, Transition};
use tally_http::handlers::test_helpers::create_test_state;
use tally_http::models::SubmitExpressionResponse;
use tally_http::routes::create_coordinator_router;
use tally_http::server::AppState;

fn coordinator_app(state: AppState) -> Router {
    create_coordinator_router().with_state(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = coordinator_app(create_test_state());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_submit_rejects_empty_expression() {
    let app = coordinator_app(create_test_state());

    let response = app
        .clone()
        .oneshot(post_json("/compute", json!({"expr": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A missing field is treated the same as an empty one.
    let response = app.oneshot(post_json("/compute", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_without_agents_reports_failure() {
    let state = create_test_state();
    let app = coordinator_app(state);

    let response = app
        .clone()
        .oneshot(post_json("/compute", json!({"expr": "2+2"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let submitted: SubmitExpressionResponse =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(submitted.status, ExpressionStatus::Failed);

    // Terminal, so /result answers right away with the failure.
    let response = app
        .oneshot(get(&format!("/result?task_id={}", submitted.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let record = body_json(response).await;
    assert_eq!(record["status"], "failed");
    assert_eq!(record["error"]["kind"], "dispatch_failed");
}

#[tokio::test]
async fn test_status_of_unknown_expression() {
    let app = coordinator_app(create_test_state());
    let response = app
        .oneshot(get("/status?task_id=no-such-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_result_of_unknown_expression() {
    let app = coordinator_app(create_test_state());
    let response = app
        .oneshot(get("/result?task_id=no-such-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_result_before_terminal_state_is_rejected() {
    let state = create_test_state();
    let record = state.store.create("2+2");
    state
        .store
        .transition(&record.id, Transition::Processing)
        .unwrap();

    let app = coordinator_app(state);

    let response = app
        .clone()
        .oneshot(get(&format!("/status?task_id={}", record.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "processing");

    let response = app
        .oneshot(get(&format!("/result?task_id={}", record.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_result_carries_completed_value() {
    let state = create_test_state();
    let record = state.store.create("2+2");
    state
        .store
        .transition(&record.id, Transition::Processing)
        .unwrap();
    state
        .store
        .transition(&record.id, Transition::Completed { result: 4.0 })
        .unwrap();

    let app = coordinator_app(state);
    let response = app
        .oneshot(get(&format!("/result?task_id={}", record.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["result"], 4.0);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_register_and_list_agents() {
    let app = coordinator_app(create_test_state());

    let response = app
        .clone()
        .oneshot(post_json(
            "/agents/register",
            json!({"id": "agent-1", "address": "http://127.0.0.1:8081"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let registered = body_json(response).await;
    assert_eq!(registered["id"], "agent-1");

    let response = app.oneshot(get("/agents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["agents"][0]["id"], "agent-1");
    assert_eq!(body["agents"][0]["address"], "http://127.0.0.1:8081");
}

#[tokio::test]
async fn test_register_rejects_blank_id() {
    let app = coordinator_app(create_test_state());
    let response = app
        .oneshot(post_json(
            "/agents/register",
            json!({"id": " ", "address": "http://127.0.0.1:8081"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_expressions_snapshot() {
    let state = create_test_state();
    state.store.create("1+1");
    state.store.create("2+2");

    let app = coordinator_app(state);
    let response = app.oneshot(get("/expressions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["expressions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_expression_completes_end_to_end_with_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/task")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "ignored", "result": 20.0}"#)
        .create_async()
        .await;

    let state = create_test_state();
    let app = coordinator_app(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/agents/register",
            json!({"id": "agent-1", "address": server.url()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/compute", json!({"expr": "(2+3)*4"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let submitted: SubmitExpressionResponse =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(submitted.status, ExpressionStatus::Processing);

    let record = poll_until_terminal(&app, &submitted.id).await;
    assert_eq!(record["status"], "completed");
    assert_eq!(record["result"], 20.0);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_agent_failure_surfaces_in_result() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/task")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "ignored", "error": {"kind": "unknown_function", "message": "unknown function: frob"}}"#,
        )
        .create_async()
        .await;

    let state = create_test_state();
    let app = coordinator_app(state);

    app.clone()
        .oneshot(post_json(
            "/agents/register",
            json!({"id": "agent-1", "address": server.url()}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(post_json("/compute", json!({"expr": "frob(3)"})))
        .await
        .unwrap();
    let submitted: SubmitExpressionResponse =
        serde_json::from_value(body_json(response).await).unwrap();

    let record = poll_until_terminal(&app, &submitted.id).await;
    assert_eq!(record["status"], "failed");
    assert_eq!(record["error"]["kind"], "unknown_function");
    assert!(record.get("result").is_none());
}

async fn poll_until_terminal(app: &Router, id: &str) -> Value {
    for _ in 0..200 {
        let response = app
            .clone()
            .oneshot(get(&format!("/status?task_id={}", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let record = body_json(response).await;
        if record["status"] == "completed" || record["status"] == "failed" {
            return record;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expression {} did not reach a terminal state", id);
}
