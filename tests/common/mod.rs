use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use scribe_api::auth::{self, Claims};
use scribe_api::config::SecurityConfig;
use scribe_api::routes;
use scribe_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

/// Fresh app over empty in-memory stores. Each test gets its own world.
pub fn test_app() -> Router {
    let security = SecurityConfig {
        jwt_secret: SECRET.to_string(),
        jwt_expiry_hours: 1,
    };
    routes::app(AppState::in_memory(&security))
}

pub fn token_for(sub: &str) -> String {
    auth::sign(&Claims::new(sub, 1), SECRET).expect("failed to sign test token")
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request"),
        None => builder.body(Body::empty()).expect("failed to build request"),
    }
}

/// Drive one request through the router and decode the JSON body.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request failed");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body was not JSON")
    };

    (status, body)
}
