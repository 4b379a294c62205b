use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::{NewQuery, Query};
use crate::validation;

/// GET /query - List every contact query
///
/// Requires a valid token but does not filter by principal: queries carry no
/// owner, so any authenticated caller sees all of them.
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> ApiResult<Vec<Query>> {
    let queries = state.queries.find_all().await.map_err(|e| {
        tracing::error!("Failed to list queries: {}", e);
        ApiError::not_found("Problem getting queries")
    })?;

    Ok(ApiResponse::success(queries))
}

/// POST /query - Submit a contact query (public, contact-form semantics)
pub async fn create(State(state): State<AppState>, Json(payload): Json<Value>) -> ApiResult<Value> {
    validation::validate(validation::schema("query"), &payload)?;

    let new: NewQuery = serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(format!("Malformed query payload: {}", e)))?;

    state.queries.insert(new).await.map_err(|e| {
        tracing::error!("Failed to submit query: {}", e);
        ApiError::bad_request("There was a problem submitting the query")
    })?;

    Ok(ApiResponse::created(json!({ "Message": "New Query submitted successfully" })))
}
