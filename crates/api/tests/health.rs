//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, FakePlatform, TestApp};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new(FakePlatform::new());

    for uri in ["/health", "/"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["message"], "Healthy");
    }
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::new(FakePlatform::new());
    let response = app.get("/this-route-does-not-exist", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = TestApp::new(FakePlatform::new());
    let response = app.get("/health", None).await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = TestApp::new(FakePlatform::new());
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/monday/execute-multiplication")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn cors_exposes_request_id_to_browser() {
    let app = TestApp::new(FakePlatform::new());
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(
        response.headers()["access-control-expose-headers"],
        "x-request-id"
    );
}
