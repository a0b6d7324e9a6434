use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

pub async fn extract_response_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| json!({"error": "Invalid JSON response"}))
    };
    (status, body)
}

/// Sends one request through the router and returns the raw response.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    app.clone()
        .oneshot(request)
        .await
        .expect("Router failed to respond")
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&Value>,
) -> (StatusCode, Value) {
    extract_response_body(send(app, method, uri, body).await).await
}

/// Creates a row through the API and returns its primary key.
pub async fn create_via_api(app: &Router, uri: &str, body: &Value, primary_key: &str) -> i64 {
    let (status, created) = send_json(app, "POST", uri, Some(body)).await;
    assert_eq!(
        status,
        StatusCode::CREATED,
        "Failed to create row at {uri}: {created:?}"
    );
    created[primary_key]
        .as_i64()
        .unwrap_or_else(|| panic!("Response has no {primary_key}: {created:?}"))
}
