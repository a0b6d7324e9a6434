use crate::common::test_helpers::{create_via_api, send, send_json};
use crate::config::test_helpers::setup_test_app;
use axum::http::{StatusCode, header};
use serde_json::json;

fn run_payload(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "target": 40,
        "completed": 12,
        "status": "Berjalan",
        "start_date": "2025-03-01",
        "end_date": "2025-06-30",
        "personnel": ["198601012010011001", "199002152015031002"],
        "materials": [{"item": "Kabel NYAF", "qty": 20}]
    })
}

#[tokio::test]
async fn test_production_crud_operations() {
    let app = setup_test_app().await;

    let id = create_via_api(&app, "/api/production", &run_payload("Radio Lokomotif"), "produksi_id").await;

    let (status, body) = send_json(&app, "GET", &format!("/api/production/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Radio Lokomotif");
    assert_eq!(body["personnel"][1], "199002152015031002");
    assert_eq!(body["materials"][0]["qty"], 20);
    assert!(body["created_at"].is_string());

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/production/{id}"),
        Some(&json!({"completed": 40, "status": "Selesai", "end_date": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body:?}");
    assert_eq!(body["completed"], 40);
    assert_eq!(body["status"], "Selesai");
    assert_eq!(body["end_date"], serde_json::Value::Null);
    // Absent fields keep their values
    assert_eq!(body["start_date"], "2025-03-01");
    assert_eq!(body["target"], 40);

    let response = send(&app, "DELETE", &format!("/api/production/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, "GET", &format!("/api/production/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_production_validation() {
    let app = setup_test_app().await;

    let mut payload = run_payload("  ");
    let (status, body) = send_json(&app, "POST", "/api/production", Some(&payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    payload = run_payload("Wiper Motor");
    payload["completed"] = json!(-1);
    let (status, _) = send_json(&app, "POST", "/api/production", Some(&payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    payload = run_payload("Wiper Motor");
    payload["end_date"] = json!("2025-01-01");
    let (status, body) = send_json(&app, "POST", "/api/production", Some(&payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("end_date")
    );

    let id = create_via_api(&app, "/api/production", &run_payload("Wiper Motor"), "produksi_id").await;
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/production/{id}"),
        Some(&json!({"target": -5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_production_missing_rows() {
    let app = setup_test_app().await;

    let (status, _) = send_json(&app, "PUT", "/api/production/999", Some(&json!({"status": "Selesai"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = send(&app, "DELETE", "/api/production/999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_production_list_paging_and_filtering() {
    let app = setup_test_app().await;

    for name in ["Alpha", "Bravo", "Charlie"] {
        create_via_api(&app, "/api/production", &run_payload(name), "produksi_id").await;
    }
    let mut done = run_payload("Delta");
    done["status"] = json!("Selesai");
    create_via_api(&app, "/api/production", &done, "produksi_id").await;

    let response = send(
        &app,
        "GET",
        "/api/production?range=%5B0%2C1%5D&sort=%5B%22name%22%2C%22DESC%22%5D",
        None,
    )
    .await;
    assert_eq!(
        response.headers().get(header::CONTENT_RANGE).unwrap(),
        "production 0-1/4"
    );
    let (status, body) = crate::common::test_helpers::extract_response_body(response).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|run| run["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Delta", "Charlie"]);

    let (status, body) = send_json(
        &app,
        "GET",
        "/api/production?filter=%7B%22status%22%3A%22Selesai%22%7D",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Delta");

    let (status, _) = send_json(
        &app,
        "GET",
        "/api/production?filter=%7B%22nope%22%3A1%7D",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
