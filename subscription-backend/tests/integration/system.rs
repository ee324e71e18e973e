// tests/integration/system.rs

use axum::http::{Method, StatusCode};

use crate::common::app_helper::{empty_request, send, setup_mock_app};

#[tokio::test]
async fn test_health_check_ok() {
    let (app, _store) = setup_mock_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_health_check_reports_unavailable_store() {
    let (app, store) = setup_mock_app();
    store.fail_with_db_error();

    let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _store) = setup_mock_app();

    let (status, _) = send(&app, empty_request(Method::GET, "/api/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
