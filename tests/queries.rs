mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::{request, send, test_app, token_for, SECRET};
use scribe_api::auth::{self, Claims};

#[tokio::test]
async fn submit_then_list_includes_record_verbatim() {
    let app = test_app();

    let payload = json!({
        "name": "Gafuku Ramos",
        "email": "gafuku@gmail.com",
        "subject": "Hi",
        "message": "hello"
    });

    let (status, body) = send(&app, request("POST", "/query", None, Some(&payload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["Message"], "New Query submitted successfully");

    let token = token_for("reader-1");
    let (status, body) = send(&app, request("GET", "/query", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);

    let queries = body.as_array().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["name"], "Gafuku Ramos");
    assert_eq!(queries[0]["email"], "gafuku@gmail.com");
    assert_eq!(queries[0]["subject"], "Hi");
    assert_eq!(queries[0]["message"], "hello");
}

#[tokio::test]
async fn validation_reports_every_violated_field() {
    let app = test_app();

    let payload = json!({ "name": "Gafuku Ramos", "message": "hello" });
    let (status, body) = send(&app, request("POST", "/query", None, Some(&payload))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["email"].is_string());
    assert!(body["field_errors"]["subject"].is_string());
}

#[tokio::test]
async fn rejects_malformed_email() {
    let app = test_app();

    let payload = json!({
        "name": "Gafuku Ramos",
        "email": "not-an-email",
        "subject": "Hi",
        "message": "hello"
    });
    let (status, body) = send(&app, request("POST", "/query", None, Some(&payload))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["email"].is_string());
}

#[tokio::test]
async fn list_requires_token() {
    let app = test_app();

    let (status, body) = send(&app, request("GET", "/query", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn list_rejects_expired_token() {
    let app = test_app();

    let claims = Claims {
        sub: "reader-1".to_string(),
        exp: (Utc::now() - Duration::hours(2)).timestamp(),
        iat: (Utc::now() - Duration::hours(3)).timestamp(),
    };
    let stale = auth::sign(&claims, SECRET).unwrap();

    let (status, _) = send(&app, request("GET", "/query", Some(&stale), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_rejects_garbage_token() {
    let app = test_app();

    let (status, _) = send(&app, request("GET", "/query", Some("not.a.token"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    let (status, body) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
