//! Front door to mock backend over real HTTP.
//!
//! The mock backend runs on a random port; requests enter through the relay
//! router and leave through `UreqTransport`, so both hops are exercised.

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_backend::BackendState;
use relay_core::Backend;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn spawn_backend(state: BackendState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_backend::serve(listener, mock_backend::router(state)));
    format!("http://{addr}")
}

async fn call(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| b.to_string()).unwrap_or_default())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn relay_round_trip() {
    let state = BackendState::new();
    let app = relay_server::app(Backend::connect(&spawn_backend(state.clone()).await));

    let register = json!({
        "email": "ada@example.com",
        "password": "hunter2",
        "firstname": "Ada",
        "lastname": "Lovelace"
    });
    let (status, body) = call(&app, "POST", "/api/register", Some(register.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Success"));

    let (_, body) = call(&app, "POST", "/api/register", Some(register)).await;
    assert_eq!(
        body,
        json!({"error_message": "Error: account already exists for this email."})
    );

    let (_, body) = call(
        &app,
        "POST",
        "/api/login",
        Some(json!({"email": "ada@example.com", "password": "hunter2"})),
    )
    .await;
    let token = body["token"].as_str().expect("login returns a token").to_string();

    let hits = state.hits();
    let (_, body) = call(&app, "GET", "/api/user", None).await;
    assert_eq!(body, json!({"error_message": "Please provide an access token."}));
    assert_eq!(state.hits(), hits);

    let (_, body) = call(&app, "GET", &format!("/api/user?accessToken={token}"), None).await;
    assert_eq!(body[0]["firstname"], "Ada");

    let project = json!({
        "owner_id": 1,
        "name": "Thesis",
        "description": "Final writeup",
        "due_date": "2024-05-01"
    });
    let (_, body) = call(&app, "POST", "/api/project", Some(project)).await;
    assert_eq!(body, json!("Success"));

    let uri = format!("/api/project/1?accessToken={token}");
    let (_, body) = call(&app, "GET", &uri, None).await;
    assert_eq!(body["name"], "Thesis");
    assert_eq!(body["due_date"], "2024-05-01");

    let (_, body) = call(&app, "DELETE", &uri, None).await;
    assert_eq!(body, json!("Project deleted successfully."));

    let (_, body) = call(&app, "DELETE", "/api/project/1?accessToken=stale", None).await;
    assert_eq!(
        body,
        json!({"error_message": "Invalid access token. Please login again."})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failing_backend_yields_server_error_message() {
    let url = spawn_backend(BackendState::failing(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let app = relay_server::app(Backend::connect(&url));

    let (status, body) = call(&app, "GET", "/api/project/7?accessToken=abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "error_message": "A server error occurred. If this continues, please contact a system administrator for assistance."
        })
    );
}
