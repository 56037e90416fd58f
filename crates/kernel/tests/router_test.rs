#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Router tests that never reach the database.
//!
//! Requests here are rejected during parameter validation or credential
//! extraction, so they run against an offline pool and need no services.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use fithub_test_utils::{assert, test_product};

mod common;
use common::TestApp;

// =============================================================================
// Catalog parameter validation
// =============================================================================

#[tokio::test]
async fn malformed_min_price_is_bad_request() {
    let app = TestApp::offline();
    let (status, json) = app.get("/api/products?minPrice=abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::failure(&json);
    assert_eq!(json["message"], "Invalid catalog query");
    assert::contains(json["error"].as_str().unwrap(), "minPrice");
}

#[tokio::test]
async fn malformed_max_price_is_bad_request() {
    let app = TestApp::offline();
    let (status, json) = app.get("/api/products?maxPrice=cheap").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::contains(json["error"].as_str().unwrap(), "maxPrice");
}

#[tokio::test]
async fn zero_or_malformed_page_is_bad_request() {
    let app = TestApp::offline();
    for uri in [
        "/api/products?page=0",
        "/api/products?page=first",
        "/api/products?page=-2",
    ] {
        let (status, json) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert::contains(json["error"].as_str().unwrap(), "page");
    }
}

#[tokio::test]
async fn zero_or_malformed_limit_is_bad_request() {
    let app = TestApp::offline();
    for uri in ["/api/products?limit=0", "/api/products?limit=ten"] {
        let (status, json) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert::contains(json["error"].as_str().unwrap(), "limit");
    }
}

#[tokio::test]
async fn unknown_sort_field_is_bad_request() {
    let app = TestApp::offline();
    let (status, json) = app.get("/api/products?sort=-popularity").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::contains(json["error"].as_str().unwrap(), "popularity");
}

#[tokio::test]
async fn nul_in_text_terms_is_bad_request() {
    let app = TestApp::offline();
    for uri in [
        "/api/products?search=%00",
        "/api/products?category=Yoga%00",
        "/api/products?brand=%00Acme",
    ] {
        let (status, json) = app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["message"], "Invalid catalog query");
        assert::contains(json["error"].as_str().unwrap(), "NUL");
    }
}

#[tokio::test]
async fn malformed_featured_limit_is_bad_request() {
    let app = TestApp::offline();
    let (status, json) = app.get("/api/products/featured?limit=lots").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert::failure(&json);
}

#[tokio::test]
async fn malformed_product_id_is_not_found() {
    let app = TestApp::offline();
    let (status, json) = app.get("/api/products/not-a-real-id").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert::failure(&json);
    assert_eq!(json["message"], "Product not found");
}

// =============================================================================
// Credentials
// =============================================================================

#[tokio::test]
async fn create_product_without_token_is_unauthorized() {
    let app = TestApp::offline();
    let (status, json) = app
        .call(
            Method::POST,
            "/api/products",
            None,
            Some(test_product("Jump Rope").to_json()),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert::failure(&json);
}

#[tokio::test]
async fn non_bearer_authorization_is_unauthorized() {
    let app = TestApp::offline();
    let request = axum::http::Request::builder()
        .method(Method::DELETE)
        .uri("/api/products/0190f5a2-7b1c-7d3e-8f00-000000000001")
        .header("Authorization", "Basic YWRtaW46YWRtaW4=")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_endpoints_without_token_are_unauthorized() {
    let app = TestApp::offline();
    let id = "0190f5a2-7b1c-7d3e-8f00-000000000001";

    let cases = [
        (Method::GET, "/api/admin/stats".to_string()),
        (Method::GET, "/api/admin/users".to_string()),
        (Method::DELETE, format!("/api/admin/users/{id}")),
        (Method::PUT, format!("/api/admin/users/{id}/role")),
        (Method::PUT, format!("/api/products/{id}")),
        (Method::DELETE, format!("/api/products/{id}")),
    ];

    for (method, uri) in cases {
        let (status, json) = app.call(method.clone(), &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert::failure(&json);
    }
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = TestApp::offline();
    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["postgres"], false);
}

#[tokio::test]
async fn stalled_request_times_out_with_error_envelope() {
    // The offline pool spends 500ms retrying before giving up.
    let app = TestApp::offline_with_timeout(Duration::from_millis(50));
    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert::failure(&json);
    assert_eq!(json["message"], "Request timed out");
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn preflight_allows_bearer_header() {
    let app = TestApp::offline();
    let request = axum::http::Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/products")
        .header("Origin", "https://shop.example.com")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization,content-type")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.request(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert::contains(
        &headers["access-control-allow-headers"]
            .to_str()
            .unwrap()
            .to_lowercase(),
        "authorization",
    );
}
