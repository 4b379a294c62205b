use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{articles, queries};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resources
        .merge(article_routes())
        .merge(query_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(articles::list).post(articles::create))
        .route(
            "/articles/:id",
            get(articles::find)
                .put(articles::update)
                .patch(articles::patch)
                .delete(articles::remove),
        )
}

fn query_routes() -> Router<AppState> {
    Router::new().route("/query", get(queries::list).post(queries::create))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Scribe API (Rust)",
        "version": version,
        "description": "Articles and contact queries behind a JWT-gated REST API",
        "endpoints": {
            "articles": "/articles[/:id] (GET public; POST/PUT/PATCH/DELETE bearer)",
            "query": "/query (GET bearer; POST public)",
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    let ping = match state.articles.ping().await {
        Ok(_) => state.queries.ping().await,
        err => err,
    };

    match ping {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
