use crate::common::test_helpers::{create_via_api, send_json};
use crate::config::test_helpers::setup_test_app;
use axum::http::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_engineering_crud_operations() {
    let app = setup_test_app().await;

    let id = create_via_api(
        &app,
        "/api/engineering",
        &json!({
            "name": "Retrofit Sistem Pengereman",
            "status": "Perencanaan",
            "team": ["Andi", "Sari"],
            "deadline": "2025-12-01",
            "progress": 10
        }),
        "rekayasa_id",
    )
    .await;

    let (status, body) = send_json(&app, "GET", &format!("/api/engineering/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"], json!(["Andi", "Sari"]));

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/engineering/{id}"),
        Some(&json!({"team": ["Andi", "Sari", "Budi"], "deadline": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body:?}");
    assert_eq!(body["team"].as_array().unwrap().len(), 3);
    assert_eq!(body["deadline"], Value::Null);
    assert_eq!(body["progress"], 10);

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/engineering/{id}"),
        Some(&json!({"progress": 150})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send_json(&app, "GET", &format!("/api/engineering/{id}"), None).await;
    assert_eq!(body["progress"], 10, "Rejected update must not be saved");
}

#[tokio::test]
async fn test_engineering_requires_name() {
    let app = setup_test_app().await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/engineering",
        Some(&json!({"name": "", "status": "Perencanaan"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "ValidationError");
}
