//! Authentication tests for the admin routes.
//!
//! Tests verify:
//! - Protected routes challenge with `WWW-Authenticate`
//! - Missing, malformed, and wrong credentials are all rejected
//! - Rejected uploads and deletes leave the content root untouched
//! - Public routes need no credentials

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use base64::{engine::general_purpose::STANDARD, Engine};

use image_gallery::server::auth::DEFAULT_REALM;
use image_gallery::Credentials;

use super::test_utils::{
    admin_auth, body_json, upload_request, TestApp, TEST_PASSWORD, TEST_USERNAME,
};

const RECORD: &str = "00000000-0000-4000-8000-000000000000.png";

fn basic(raw: &str) -> String {
    format!("Basic {}", STANDARD.encode(raw))
}

async fn request_with_auth(
    app: &TestApp,
    method: &str,
    uri: &str,
    authorization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    app.send(builder.body(Body::empty()).unwrap()).await
}

fn assert_challenge(response: &Response<Body>, realm: &str) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        format!("Basic realm=\"{}\"", realm).as_str()
    );
}

// =============================================================================
// Challenges
// =============================================================================

#[tokio::test]
async fn test_admin_without_credentials_is_challenged() {
    let app = TestApp::new();

    let response = app.get("/admin").await;
    assert_challenge(&response, DEFAULT_REALM);

    let error = body_json(response).await;
    assert_eq!(error["error"], "missing_credentials");
    assert_eq!(error["status"], 401);
}

#[tokio::test]
async fn test_every_protected_route_is_challenged() {
    let app = TestApp::new();
    let delete_uri = format!("/admin/delete/{}", RECORD);

    for (method, uri) in [
        ("GET", "/admin"),
        ("POST", "/upload"),
        ("GET", delete_uri.as_str()),
        ("POST", delete_uri.as_str()),
    ] {
        let response = request_with_auth(&app, method, uri, None).await;
        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "{} {} should require credentials",
            method,
            uri
        );
    }
}

#[tokio::test]
async fn test_custom_realm_in_challenge() {
    let app = TestApp::with_config(|config| config.with_realm("Gallery admin"));

    let response = app.get("/admin").await;
    assert_challenge(&response, "Gallery admin");
}

// =============================================================================
// Rejected Credentials
// =============================================================================

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::new();
    let auth = Credentials::new(TEST_USERNAME, "wrong").to_header_value();

    let response = request_with_auth(&app, "GET", "/admin", Some(&auth)).await;
    assert_challenge(&response, DEFAULT_REALM);
    assert_eq!(body_json(response).await["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_wrong_username_is_rejected() {
    let app = TestApp::new();
    let auth = Credentials::new("root", TEST_PASSWORD).to_header_value();

    let response = request_with_auth(&app, "GET", "/admin", Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "invalid_credentials");
}

#[tokio::test]
async fn test_credentials_are_case_sensitive() {
    let app = TestApp::new();
    let auth = Credentials::new("Admin", TEST_PASSWORD).to_header_value();

    let response = request_with_auth(&app, "GET", "/admin", Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_prefix_is_rejected() {
    let app = TestApp::new();
    let auth = Credentials::new(TEST_USERNAME, &TEST_PASSWORD[..5]).to_header_value();

    let response = request_with_auth(&app, "GET", "/admin", Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_headers_are_rejected() {
    let app = TestApp::new();

    let bearer = format!("Bearer {}", STANDARD.encode("admin:x"));
    let no_colon = basic("adminonly");
    for value in [
        "Basic",
        "Basic !!!not-base64!!!",
        no_colon.as_str(),
        bearer.as_str(),
    ] {
        let response = request_with_auth(&app, "GET", "/admin", Some(value)).await;
        assert_challenge(&response, DEFAULT_REALM);
        assert_eq!(
            body_json(response).await["error"],
            "malformed_credentials",
            "{:?} should be malformed",
            value
        );
    }
}

// =============================================================================
// Rejected Requests Have No Effect
// =============================================================================

#[tokio::test]
async fn test_unauthenticated_upload_stores_nothing() {
    let app = TestApp::new();

    let response = app
        .send(upload_request(None, "image", "cat.png", b"\x89PNG"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.content_files().is_empty());

    let wrong = Credentials::new(TEST_USERNAME, "guess").to_header_value();
    let response = app
        .send(upload_request(Some(&wrong), "image", "cat.png", b"\x89PNG"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.content_files().is_empty());
}

#[tokio::test]
async fn test_unauthenticated_delete_removes_nothing() {
    let app = TestApp::new();
    app.seed(RECORD, b"keep me");
    let uri = format!("/admin/delete/{}", RECORD);

    for method in ["GET", "POST"] {
        let response = request_with_auth(&app, method, &uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let wrong = basic("admin:nope");
    let response = request_with_auth(&app, "POST", &uri, Some(&wrong)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(app.content_files(), vec![RECORD.to_string()]);
}

// =============================================================================
// Accepted Credentials
// =============================================================================

#[tokio::test]
async fn test_valid_credentials_reach_admin_page() {
    let app = TestApp::new();

    let response = app.get_as_admin("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());
}

#[tokio::test]
async fn test_lowercase_scheme_is_accepted() {
    let app = TestApp::new();
    let auth = admin_auth().replacen("Basic", "basic", 1);

    let response = request_with_auth(&app, "GET", "/admin", Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_password_with_colon_is_accepted() {
    let app = TestApp::with_config(|mut config| {
        config.credentials = Credentials::new("curator", "pa:ss:word");
        config
    });

    let auth = basic("curator:pa:ss:word");
    let response = request_with_auth(&app, "GET", "/admin", Some(&auth)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_need_no_credentials() {
    let app = TestApp::new();
    app.seed(RECORD, b"public");

    for uri in ["/", "/images", "/health", "/assets/style.css"] {
        assert_eq!(app.get(uri).await.status(), StatusCode::OK, "{}", uri);
    }
    assert_eq!(
        app.get(&format!("/images/{}", RECORD)).await.status(),
        StatusCode::OK
    );
}
