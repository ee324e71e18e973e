// tests/integration/subscriptions/list_tests.rs

use axum::http::{Method, StatusCode};
use uuid::Uuid;

use crate::common::app_helper::{empty_request, send, setup_mock_app};
use crate::common::test_data::{month, subscription_row};

#[tokio::test]
async fn test_list_with_from_filter() {
    let (app, store) = setup_mock_app();
    let user_id = Uuid::new_v4();
    store.seed(subscription_row(user_id, "Netflix", 10, month(2025, 9)));
    store.seed(subscription_row(user_id, "Spotify", 20, month(2025, 10)));
    store.seed(subscription_row(user_id, "Kinopoisk", 30, month(2025, 11)));

    let (status, body) = send(&app, empty_request(Method::GET, "/api/list?from=10-2025")).await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    let names: Vec<_> = items
        .iter()
        .map(|i| i["service_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Spotify", "Kinopoisk"]);
    assert_eq!(items[0]["start_date"], "10-2025");
}

#[tokio::test]
async fn test_list_empty_params_are_ignored() {
    let (app, store) = setup_mock_app();
    store.seed(subscription_row(Uuid::new_v4(), "Netflix", 10, month(2025, 9)));

    let (status, body) = send(
        &app,
        empty_request(
            Method::GET,
            "/api/list?user_id=&service_name=&from=&to=&limit=&offset=",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_filters_combine() {
    let (app, store) = setup_mock_app();
    let user_id = Uuid::new_v4();
    store.seed(subscription_row(user_id, "Yandex Plus", 400, month(2025, 7)));
    store.seed(subscription_row(user_id, "Netflix", 10, month(2025, 7)));
    store.seed(subscription_row(Uuid::new_v4(), "Yandex Plus", 400, month(2025, 7)));

    let (status, body) = send(
        &app,
        empty_request(
            Method::GET,
            &format!("/api/list?user_id={user_id}&service_name=yandex&to=07-2025"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user_id"], user_id.to_string());
}

#[tokio::test]
async fn test_list_invalid_month_is_rejected() {
    let (app, store) = setup_mock_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/list?from=2025-10")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid from format, expected MM-YYYY");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_list_invalid_user_id_is_bad_request() {
    let (app, _store) = setup_mock_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/list?user_id=abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_list_negative_offset_is_rejected() {
    let (app, store) = setup_mock_app();

    let (status, body) = send(&app, empty_request(Method::GET, "/api/list?offset=-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "validation_errors");
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_list_pagination() {
    let (app, store) = setup_mock_app();
    let user_id = Uuid::new_v4();
    for m in 1..=6 {
        store.seed(subscription_row(user_id, &format!("S{m}"), 10, month(2025, m)));
    }

    let (status, body) = send(&app, empty_request(Method::GET, "/api/list?limit=2&offset=2")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["service_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["S3", "S4"]);
}
