use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::ownership::require_owner;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::{Article, ArticleChanges, NewArticle};
use crate::validation;

/// GET /articles - List all articles (public)
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Article>> {
    let articles = state.articles.find_all().await.map_err(|e| {
        tracing::error!("Failed to list articles: {}", e);
        ApiError::not_found("Problem getting articles")
    })?;

    Ok(ApiResponse::success(articles))
}

/// GET /articles/:id - Get a single article (public)
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Article> {
    let article = state
        .articles
        .find_by_id(&id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch article {}: {}", id, e);
            ApiError::not_found("Article doesn't exist!")
        })?
        .ok_or_else(|| ApiError::not_found("Article doesn't exist!"))?;

    Ok(ApiResponse::success(article))
}

/// POST /articles - Create an article for the authenticated principal
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<Value>,
) -> ApiResult<Value> {
    validation::validate(validation::schema("article"), &payload)?;

    let mut new: NewArticle = serde_json::from_value(payload)
        .map_err(|e| ApiError::bad_request(format!("Malformed article payload: {}", e)))?;
    new.owner_id = user.id;

    state.articles.insert(new).await.map_err(|e| {
        tracing::error!("Failed to create article: {}", e);
        ApiError::bad_request("There was a problem publishing the article")
    })?;

    Ok(ApiResponse::created(json!({ "Message": "New Article Created" })))
}

/// PUT /articles/:id - Overwrite the supplied fields, owner only
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(changes): Json<ArticleChanges>,
) -> ApiResult<Article> {
    let existing = find_required(&state, &id).await?;
    require_owner(&user, &existing)?;

    let updated = state
        .articles
        .update(&id, changes)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update article {}: {}", id, e);
            ApiError::not_found("We couldn't find that article")
        })?
        .ok_or_else(|| ApiError::not_found("We couldn't find that article"))?;

    Ok(ApiResponse::success(updated))
}

/// PATCH /articles/:id - Overwrite the supplied fields
///
/// Existence is checked but ownership is not: any authenticated principal
/// may patch any article, and the payload bypasses schema validation.
pub async fn patch(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Json(changes): Json<ArticleChanges>,
) -> ApiResult<Value> {
    find_required(&state, &id).await?;

    state
        .articles
        .update(&id, changes)
        .await
        .map_err(|e| {
            tracing::error!("Failed to patch article {}: {}", id, e);
            ApiError::not_found("We couldn't find that article")
        })?
        .ok_or_else(|| ApiError::not_found("Article is not found"))?;

    Ok(ApiResponse::success(json!({ "message": "Article is updated" })))
}

/// DELETE /articles/:id - Permanently remove an article, owner only
pub async fn remove(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let existing = find_required(&state, &id).await?;
    require_owner(&user, &existing)?;

    let deleted = state.articles.delete(&id).await.map_err(|e| {
        tracing::error!("Failed to delete article {}: {}", id, e);
        ApiError::not_found("This article doesn't exist!")
    })?;

    if !deleted {
        return Err(ApiError::not_found("This article doesn't exist!"));
    }

    Ok(ApiResponse::accepted(json!({ "Message": "Article deleted successfully" })))
}

/// Fetch an article or fail with 404. Runs before any ownership check so a
/// missing article is reported as not-found, never as forbidden.
async fn find_required(state: &AppState, id: &str) -> Result<Article, ApiError> {
    state
        .articles
        .find_by_id(id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch article {}: {}", id, e);
            ApiError::not_found("This article doesn't exist!")
        })?
        .ok_or_else(|| ApiError::not_found("This article doesn't exist!"))
}
