use super::models::{HealthCheck, UIConfiguration};
use super::test_helpers::send_json;
use crate::config::Config;
use crate::config::test_helpers::setup_test_app;
use axum::http::StatusCode;

#[test]
fn test_ui_configuration_from_config() {
    let config = Config::for_tests();
    let ui = UIConfiguration::from(&config);

    assert_eq!(ui.client_id, "test-ui");
    assert_eq!(ui.realm, "test-realm");
    assert_eq!(ui.deployment, "test");

    let json = serde_json::to_value(&ui).unwrap();
    assert_eq!(json["clientId"], "test-ui");
    assert!(json.get("client_id").is_none());
}

#[test]
fn test_health_check_serialization() {
    let json = serde_json::to_string(&HealthCheck {
        status: "ok".to_string(),
    })
    .unwrap();
    assert_eq!(json, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_healthz_pings_database() {
    let app = setup_test_app().await;

    let (status, body) = send_json(&app, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ui_config_endpoint() {
    let app = setup_test_app().await;

    let (status, body) = send_json(&app, "GET", "/api/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["clientId"], "test-ui");
    assert_eq!(body["url"], "");
}

#[tokio::test]
async fn test_api_docs_are_served() {
    let app = setup_test_app().await;

    let response = super::test_helpers::send(&app, "GET", "/api/docs", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
