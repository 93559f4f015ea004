use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use finfeed_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        benzinga_api_key: None,
        fmp_api_key: None,
    }
}

fn test_app() -> axum::Router {
    let config = test_config();
    let state = build_state(&config).unwrap();
    app_router(state, &config)
}

async fn get(app: axum::Router, uri: &str) -> (u16, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn healthz_works() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readyz_works() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn unknown_provider_is_bad_request() {
    let (status, body) = get(
        test_app(),
        "/api/v1/analyst/price-targets?provider=bloomberg&symbol=AAPL",
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 400);
    assert!(body["message"].as_str().unwrap().contains("bloomberg"));
}

#[tokio::test]
async fn fmp_price_targets_require_symbol() {
    let (status, body) = get(test_app(), "/api/v1/analyst/price-targets").await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn missing_credential_is_unauthorized() {
    // validation passes, extraction fails before any network call
    let (status, body) = get(test_app(), "/api/v1/analyst/price-targets?symbol=AAPL").await;
    assert_eq!(status, 401);
    assert!(body["message"].as_str().unwrap().contains("fmp_api_key"));
}

#[tokio::test]
async fn benzinga_invalid_action_is_bad_request() {
    let (status, _) = get(
        test_app(),
        "/api/v1/analyst/price-targets?provider=benzinga&action=sidegrades",
    )
    .await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn benzinga_missing_credential_is_unauthorized() {
    let (status, body) = get(
        test_app(),
        "/api/v1/analyst/price-targets?provider=benzinga&symbol=AAPL",
    )
    .await;
    assert_eq!(status, 401);
    assert!(body["message"].as_str().unwrap().contains("benzinga_api_key"));
}

#[tokio::test]
async fn unknown_index_is_bad_request() {
    let (status, _) = get(test_app(), "/api/v1/index/constituents?index=ftse100").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn index_routes_are_fmp_only() {
    let (status, _) = get(test_app(), "/api/v1/index/constituents?provider=benzinga").await;
    assert_eq!(status, 400);

    // explicit fmp passes routing and stops at the credential check
    let (status, _) = get(test_app(), "/api/v1/index/snapshots?provider=fmp").await;
    assert_eq!(status, 401);
}
