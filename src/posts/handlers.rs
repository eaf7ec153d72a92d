use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    posts::{
        dto::{merge_field, CreatePostRequest, PostResponse, UpdatePostRequest},
        repo,
    },
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    if payload.title.is_empty() || payload.content.is_empty() {
        warn!(author_id = %user_id, "post creation with missing fields");
        return Err(ApiError::Validation("title and content are required".into()));
    }

    let post = repo::insert(&state.db, user_id, &payload.title, &payload.content).await?;
    let row = repo::find_with_author(&state.db, post.id)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(post_id = %post.id, author_id = %user_id, "post created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// Reads are public: no token required.
#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let rows = repo::list_with_authors(&state.db).await?;
    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let row = repo::find_with_author(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    if post.author_id != user_id {
        warn!(post_id = %id, author_id = %post.author_id, caller_id = %user_id, "update by non-author");
        return Err(ApiError::Forbidden);
    }

    let title = merge_field(payload.title, post.title);
    let content = merge_field(payload.content, post.content);
    repo::update_fields(&state.db, id, &title, &content).await?;

    let row = repo::find_with_author(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!(post_id = %id, author_id = %user_id, "post updated");
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let post = repo::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    if post.author_id != user_id {
        warn!(post_id = %id, author_id = %post.author_id, caller_id = %user_id, "delete by non-author");
        return Err(ApiError::Forbidden);
    }

    repo::delete(&state.db, id).await?;
    info!(post_id = %id, author_id = %user_id, "post deleted");
    Ok(Json(serde_json::json!({ "msg": "Post deleted" })))
}
