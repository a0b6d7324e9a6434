use crate::common::test_helpers::{create_via_api, send, send_json};
use crate::config::test_helpers::setup_test_app;
use axum::http::{StatusCode, header};
use serde_json::json;

#[tokio::test]
async fn test_calibration_crud_operations() {
    let app = setup_test_app().await;

    let id = create_via_api(
        &app,
        "/api/calibration",
        &json!({
            "tool_name": "Torque Wrench 200Nm",
            "status": "Menunggu",
            "progress_step": 1,
            "due_date": "2025-08-20"
        }),
        "calibration_id",
    )
    .await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/calibration/{id}"),
        Some(&json!({"progress_step": 5, "status": "Selesai"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body:?}");
    assert_eq!(body["progress_step"], 5);
    assert_eq!(body["due_date"], "2025-08-20");

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/calibration/{id}"),
        Some(&json!({"progress_step": 6})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/api/calibration", None).await;
    assert_eq!(
        response.headers().get(header::CONTENT_RANGE).unwrap(),
        "calibration 0-0/1"
    );
}

#[tokio::test]
async fn test_calibration_rejects_missing_tool_name() {
    let app = setup_test_app().await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/calibration",
        Some(&json!({"tool_name": " ", "status": "Menunggu"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
