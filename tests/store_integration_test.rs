//! Integration tests for the client store over HTTP
//!
//! These tests drive `BpmnStore` and the connection monitor through the real
//! `ApiClient` against a mock backend:
//! 1. Upload success and failure
//! 2. Per-expert suggestion fetches
//! 3. Health checks against a reachable and an unreachable backend

use bpmn_review_client::{
    check_connection, ApiClient, BpmnStore, ClientError, ConnectionMonitor, ExpertId,
    HealthStatus, ProcessModel, UploadPayload,
};
use mockito::{Matcher, Server};
use serde_json::json;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;

/// Helper to create a store backed by the mock server
fn create_test_store(server: &Server) -> BpmnStore<ApiClient> {
    BpmnStore::new(ApiClient::with_client(reqwest::Client::new(), server.url()))
}

fn payload() -> UploadPayload {
    UploadPayload::new("order.bpmn", "<definitions/>")
}

/// Upload a valid file: the returned model becomes current
#[tokio::test]
#[serial]
async fn test_upload_valid_file() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/bpmn/upload")
        .with_status(200)
        .with_body(r#"{"bpmn": {"id": "p1"}}"#)
        .create_async()
        .await;

    let store = create_test_store(&server);
    store.upload(payload()).await.expect("upload should succeed");

    mock.assert_async().await;
    let state = store.snapshot().await;
    assert_eq!(state.current_bpmn, Some(ProcessModel(json!({"id": "p1"}))));
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

/// Upload answered with HTTP 500: model unchanged, fixed error recorded
#[tokio::test]
#[serial]
async fn test_upload_server_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/bpmn/upload")
        .with_status(500)
        .create_async()
        .await;

    let store = create_test_store(&server);
    let result = store.upload(payload()).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(ClientError::Upload)));
    let state = store.snapshot().await;
    assert!(state.current_bpmn.is_none());
    assert_eq!(state.error.as_deref(), Some("上传失败"));
    assert!(!state.is_loading);
}

/// The model is always the one from the last successful upload
#[tokio::test]
#[serial]
async fn test_upload_sequence_keeps_last_success() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/api/v1/bpmn/upload")
        .match_body(Matcher::Regex(r#"filename="first.bpmn""#.to_string()))
        .with_status(200)
        .with_body(r#"{"bpmn": {"id": "first"}}"#)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/api/v1/bpmn/upload")
        .match_body(Matcher::Regex(r#"filename="second.bpmn""#.to_string()))
        .with_status(422)
        .create_async()
        .await;

    let store = create_test_store(&server);
    store
        .upload(UploadPayload::new("first.bpmn", "<definitions/>"))
        .await
        .expect("first upload should succeed");
    assert!(store
        .upload(UploadPayload::new("second.bpmn", "<definitions/>"))
        .await
        .is_err());

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(
        store.current_model().await,
        Some(ProcessModel(json!({"id": "first"})))
    );
    assert!(store.has_error().await);
}

/// fetch_suggestions(2) only touches the process expert's list
#[tokio::test]
#[serial]
async fn test_fetch_suggestions_touches_only_requested_key() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/bpmn/suggestions/2")
        .with_status(200)
        .with_body(r#"{"suggestions": ["reduce latency"]}"#)
        .create_async()
        .await;

    let store = create_test_store(&server);
    let expert = ExpertId::try_from(2u8).expect("2 is the process expert");
    store
        .fetch_suggestions(expert)
        .await
        .expect("fetch should succeed");

    mock.assert_async().await;
    assert_eq!(
        store.suggestions(ExpertId::Process).await,
        vec![json!("reduce latency")]
    );
    assert!(store.suggestions(ExpertId::Business).await.is_empty());
    assert!(store.suggestions(ExpertId::Technical).await.is_empty());
    assert!(!store.is_loading().await);
    assert!(!store.has_error().await);
}

/// A failed fetch keeps the earlier list; the next success clears the error
#[tokio::test]
#[serial]
async fn test_fetch_failure_then_recovery() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("GET", "/api/v1/bpmn/suggestions/1")
        .with_status(200)
        .with_body(r#"{"suggestions": [{"text": "name the owner"}]}"#)
        .create_async()
        .await;
    let failing = server
        .mock("GET", "/api/v1/bpmn/suggestions/3")
        .with_status(500)
        .create_async()
        .await;

    let store = create_test_store(&server);
    assert!(store.fetch_suggestions(ExpertId::Technical).await.is_err());
    assert_eq!(store.error_message().await.as_deref(), Some("获取建议失败"));

    store
        .fetch_suggestions(ExpertId::Business)
        .await
        .expect("fetch should succeed");

    ok.assert_async().await;
    failing.assert_async().await;
    assert!(!store.has_error().await);
    assert_eq!(
        store.suggestions(ExpertId::Business).await,
        vec![json!({"text": "name the owner"})]
    );
}

/// Transport failures are recorded like any other failure
#[tokio::test]
async fn test_unreachable_backend_records_error() {
    let store = BpmnStore::new(ApiClient::with_client(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
    ));

    let result = store.fetch_suggestions(ExpertId::Business).await;

    assert!(matches!(result, Err(ClientError::Http(_))));
    assert!(store.has_error().await);
    assert!(!store.is_loading().await);
}

/// Health check against a live backend reports its status
#[tokio::test]
#[serial]
async fn test_health_check_reports_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health-check")
        .match_query(Matcher::Regex(r"timestamp=\d+".to_string()))
        .with_status(200)
        .with_body(r#"{"status": "healthy"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_client(reqwest::Client::new(), server.url());
    let status = check_connection(&client).await;

    mock.assert_async().await;
    assert_eq!(status.status, "healthy");
}

/// Health check against an unreachable backend never errors
#[tokio::test]
async fn test_health_check_unreachable_backend() {
    let client = Arc::new(ApiClient::with_client(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
    ));

    assert_eq!(check_connection(client.as_ref()).await, HealthStatus::error());

    let mut monitor = ConnectionMonitor::spawn(client, Duration::from_secs(30));
    let status = monitor.next_status().await;
    assert_eq!(status, Some(HealthStatus::error()));
    assert!(monitor.is_running());
    monitor.stop().await;
}
