//! Integration tests for the submit path.
//!
//! These tests spin up a real capture server stub (axum) on a random port,
//! submit forms through the library, and verify the status surface, the
//! request bodies on the wire, and the form-reset behavior.
//!
//! Run with: cargo test --test capture_flow

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

use quickstash::{
    file_capture, note_capture, url_capture, Config, Form, FormSubmitter, MemoryStatus,
    StashClient, StashError, Tone,
};

/// Requests seen by the stub server: (path, JSON body).
type Recorded = Arc<Mutex<Vec<(String, Value)>>>;

#[derive(Clone)]
struct StubState {
    recorded: Recorded,
    saved_path: String,
}

async fn capture_ok(
    State(state): State<StubState>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Json<Value> {
    state
        .recorded
        .lock()
        .unwrap()
        .push((uri.path().to_string(), body));
    Json(json!({ "path": state.saved_path, "type": "item", "processors": [] }))
}

/// Stub server that accepts every capture endpoint and records requests.
fn ok_router(recorded: Recorded, saved_path: &str) -> Router {
    let state = StubState {
        recorded,
        saved_path: saved_path.to_string(),
    };
    Router::new()
        .route("/url", post(capture_ok))
        .route("/note", post(capture_ok))
        .route("/code", post(capture_ok))
        .route("/file", post(capture_ok))
        .with_state(state)
}

/// Bind a random port, serve the router in the background, return the base URL.
async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> StashClient {
    let config = Config {
        server_url: base_url.to_string(),
        timeout_secs: 5,
    };
    StashClient::new(&config).expect("Failed to build client")
}

#[tokio::test]
async fn success_sets_status_and_clears_form() {
    let recorded: Recorded = Arc::default();
    let base_url = spawn_server(ok_router(recorded.clone(), "notes/abc.md")).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    let mut form = Form::new("note");
    form.set("title", "Ideas");
    form.set("body", "hello");
    let mut binding = submitter.bind(form, note_capture);

    assert!(submitter.submit(&mut binding).await);

    assert_eq!(
        status.last(),
        Some(("Saved to notes/abc.md".to_string(), Tone::Success))
    );
    assert!(binding.form().is_empty(), "form should be cleared on success");

    let requests = recorded.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "/note");
    assert_eq!(
        requests[0].1,
        json!({ "title": "Ideas", "body": "hello" })
    );
}

#[tokio::test]
async fn empty_optional_fields_are_omitted_from_the_wire() {
    let recorded: Recorded = Arc::default();
    let base_url = spawn_server(ok_router(recorded.clone(), "notes/abc.md")).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    // title present but blank: must not appear in the body at all
    let mut form = Form::new("note");
    form.set("title", "");
    form.set("body", "hello");
    let mut binding = submitter.bind(form, note_capture);

    assert!(submitter.submit(&mut binding).await);

    let requests = recorded.lock().unwrap();
    assert_eq!(requests[0].1, json!({ "body": "hello" }));
}

#[tokio::test]
async fn file_capture_body_carries_base64_content() {
    let recorded: Recorded = Arc::default();
    let base_url = spawn_server(ok_router(recorded.clone(), "files/data.bin")).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    let mut form = Form::new("file");
    form.set("name", "data.bin");
    form.set("content_b64", BASE64.encode(b"hello world"));
    let mut binding = submitter.bind(form, file_capture);

    assert!(submitter.submit(&mut binding).await);
    assert_eq!(
        status.last(),
        Some(("Saved to files/data.bin".to_string(), Tone::Success))
    );
    assert!(binding.form().is_empty());

    let requests = recorded.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "/file");
    assert_eq!(
        requests[0].1,
        json!({ "name": "data.bin", "content_b64": "aGVsbG8gd29ybGQ=" })
    );
}

#[tokio::test]
async fn health_reports_server_fields() {
    let router = Router::new().route(
        "/health",
        get(|| async {
            Json(json!({
                "status": "ok",
                "root": "/data/stash",
                "bind_host": "127.0.0.1",
                "port": 8765,
            }))
        }),
    );
    let base_url = spawn_server(router).await;

    let health = client_for(&base_url).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.root.as_deref(), Some("/data/stash"));
    assert_eq!(health.bind_host.as_deref(), Some("127.0.0.1"));
    assert_eq!(health.port, Some(8765));
}

#[tokio::test]
async fn health_failure_maps_to_api_error() {
    async fn unavailable() -> (StatusCode, String) {
        (StatusCode::SERVICE_UNAVAILABLE, String::new())
    }
    let router = Router::new().route("/health", get(unavailable));
    let base_url = spawn_server(router).await;

    let err = client_for(&base_url).health().await.unwrap_err();
    match err {
        StashError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Request failed: 503");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn http_failure_with_empty_body_uses_generic_message() {
    async fn fail_empty() -> (StatusCode, String) {
        (StatusCode::INTERNAL_SERVER_ERROR, String::new())
    }
    let router = Router::new().route("/note", post(fail_empty));
    let base_url = spawn_server(router).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    let mut form = Form::new("note");
    form.set("body", "hello");
    let mut binding = submitter.bind(form, note_capture);

    assert!(!submitter.submit(&mut binding).await);

    assert_eq!(
        status.last(),
        Some(("Request failed: 500".to_string(), Tone::Error))
    );
    // Form keeps its values on failure.
    assert_eq!(binding.form().get("body"), Some("hello"));
}

#[tokio::test]
async fn http_failure_body_becomes_the_error_message() {
    async fn fail_with_body() -> (StatusCode, String) {
        (StatusCode::BAD_REQUEST, "missing url".to_string())
    }
    let router = Router::new().route("/url", post(fail_with_body));
    let base_url = spawn_server(router).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    let mut form = Form::new("url");
    form.set("url", "");
    let mut binding = submitter.bind(form, url_capture);

    assert!(!submitter.submit(&mut binding).await);
    assert_eq!(
        status.last(),
        Some(("missing url".to_string(), Tone::Error))
    );
}

#[tokio::test]
async fn network_error_surfaces_with_error_tone() {
    // Grab a port with nothing listening on it.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&format!("http://{}", addr)), status.clone());

    let mut form = Form::new("note");
    form.set("body", "hello");
    let mut binding = submitter.bind(form, note_capture);

    assert!(!submitter.submit(&mut binding).await);

    let (message, tone) = status.last().expect("status should be set");
    assert_eq!(tone, Tone::Error);
    assert!(!message.is_empty());
    assert_eq!(binding.form().get("body"), Some("hello"));
}

#[tokio::test]
async fn unparseable_success_body_is_an_error() {
    async fn not_json() -> String {
        "<html>oops</html>".to_string()
    }
    let router = Router::new().route("/note", post(not_json));
    let base_url = spawn_server(router).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    let mut form = Form::new("note");
    form.set("body", "hello");
    let mut binding = submitter.bind(form, note_capture);

    assert!(!submitter.submit(&mut binding).await);

    let (_, tone) = status.last().expect("status should be set");
    assert_eq!(tone, Tone::Error);
    assert!(!binding.form().is_empty(), "form must survive a parse failure");
}

#[tokio::test]
async fn concurrent_submissions_post_their_own_snapshots() {
    let recorded: Recorded = Arc::default();
    let base_url = spawn_server(ok_router(recorded.clone(), "stash/item.md")).await;

    let status = Arc::new(MemoryStatus::new());
    let submitter = FormSubmitter::new(client_for(&base_url), status.clone());

    let mut url_form = Form::new("url");
    url_form.set("url", "https://example.com");
    let mut url_binding = submitter.bind(url_form, url_capture);

    let mut note_form = Form::new("note");
    note_form.set("body", "hello");
    let mut note_binding = submitter.bind(note_form, note_capture);

    let (url_ok, note_ok) = tokio::join!(
        submitter.submit(&mut url_binding),
        submitter.submit(&mut note_binding),
    );
    assert!(url_ok);
    assert!(note_ok);

    let requests = recorded.lock().unwrap();
    assert_eq!(requests.len(), 2);
    let url_request = requests.iter().find(|(path, _)| path == "/url").unwrap();
    let note_request = requests.iter().find(|(path, _)| path == "/note").unwrap();
    assert_eq!(url_request.1, json!({ "url": "https://example.com" }));
    assert_eq!(note_request.1, json!({ "body": "hello" }));

    // Whichever settled last owns the display; either way it is a success.
    let (message, tone) = status.last().expect("status should be set");
    assert_eq!(tone, Tone::Success);
    assert!(message.starts_with("Saved to "));
}
