use mockito::Matcher;

use tally_cli::api_client::{ApiClient, ApiError};
use tally_core::expression_store::ExpressionStatus;
use tally_core::task::FailureKind;

#[tokio::test]
async fn test_submit_expression() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/compute")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"expr": "2+3*4"})))
        .with_status(202)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "abc-123", "status": "processing"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let response = client.submit_expression("2+3*4").await.unwrap();

    assert_eq!(response.id, "abc-123");
    assert_eq!(response.status, ExpressionStatus::Processing);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_status_sends_task_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/status")
        .match_query(Matcher::UrlEncoded("task_id".into(), "abc-123".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "abc-123", "expression": "2+3*4", "status": "processing"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let record = client.get_status("abc-123").await.unwrap();

    assert_eq!(record.id, "abc-123");
    assert_eq!(record.status, ExpressionStatus::Processing);
    assert_eq!(record.result, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_result_of_completed_expression() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/result")
        .match_query(Matcher::UrlEncoded("task_id".into(), "abc-123".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "abc-123", "expression": "2+3*4", "status": "completed", "result": 14.0}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let record = client.get_result("abc-123").await.unwrap();

    assert_eq!(record.status, ExpressionStatus::Completed);
    assert_eq!(record.result, Some(14.0));
}

#[tokio::test]
async fn test_get_result_of_failed_expression() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/result")
        .match_query(Matcher::UrlEncoded("task_id".into(), "abc-123".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "abc-123", "expression": "5/0", "status": "failed", "error": {"kind": "division_by_zero", "message": "division by zero"}}"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let record = client.get_result("abc-123").await.unwrap();

    assert_eq!(record.status, ExpressionStatus::Failed);
    assert_eq!(record.error.unwrap().kind, FailureKind::DivisionByZero);
}

#[tokio::test]
async fn test_register_agent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/agents/register")
        .match_body(Matcher::Json(
            serde_json::json!({"id": "agent-1", "address": "http://127.0.0.1:8081"}),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "agent-1", "address": "http://127.0.0.1:8081"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let agent = client
        .register_agent("agent-1", "http://127.0.0.1:8081")
        .await
        .unwrap();

    assert_eq!(agent.id, "agent-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_response_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/result")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Expression not found: missing"}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url());
    let err = client.get_result("missing").await.unwrap_err();

    match err {
        ApiError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert!(message.contains("Expression not found"));
        }
        other => panic!("expected ApiError::Api, got {:?}", other),
    }
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/agents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"agents": []}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&format!("{}/", server.url()));
    let response = client.list_agents().await.unwrap();

    assert!(response.agents.is_empty());
    mock.assert_async().await;
}
