//! Post CRUD and interaction routes.
//!
//! Handlers stay thin: extract, delegate to an action, wrap the result.

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::common::PostId;
use crate::domains::posts::actions::{core, interactions};
use crate::domains::posts::data::{CommentInput, EditPostInput, ReportInput, SubmitPostInput};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::{OptionalAuth, RequireAuth};

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Optional post-type filter ('confession', 'event', ...).
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /posts
pub async fn list_posts(
    Extension(state): Extension<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let viewer_id = viewer.as_ref().map(|u| u.member_id);
    let is_admin = viewer.as_ref().is_some_and(|u| u.is_admin);

    let items = core::list_posts(
        viewer_id,
        is_admin,
        query.post_type.as_deref(),
        limit,
        offset,
        &state.db_pool,
    )
    .await?;

    Ok(Json(json!({ "posts": items })))
}

/// GET /posts/:id
pub async fn get_post(
    Extension(state): Extension<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    let viewer_id = viewer.as_ref().map(|u| u.member_id);
    let is_admin = viewer.as_ref().is_some_and(|u| u.is_admin);

    let post = core::get_post(post_id, viewer_id, is_admin, &state.db_pool).await?;
    Ok(Json(json!({ "post": post })))
}

/// POST /posts
pub async fn create_post(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<SubmitPostInput>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let post = core::submit_post(user.member_id, input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(json!({ "post": post }))))
}

/// PUT /posts/:id
pub async fn update_post(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<PostId>,
    Json(input): Json<EditPostInput>,
) -> ApiResult<Json<serde_json::Value>> {
    let post = core::edit_post(post_id, user.member_id, user.is_admin, input, &state.db_pool)
        .await?;
    Ok(Json(json!({ "post": post })))
}

/// DELETE /posts/:id
pub async fn delete_post(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    core::delete_post(
        post_id,
        user.member_id,
        user.is_admin,
        &state.media,
        &state.db_pool,
    )
    .await?;
    Ok(Json(json!({ "deleted": true })))
}

/// POST /posts/:id/comments
pub async fn add_comment(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<PostId>,
    Json(input): Json<CommentInput>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let comment = interactions::add_comment(
        post_id,
        user.member_id,
        user.is_admin,
        input.body,
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

/// PUT /posts/:id/like
pub async fn like_post(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    let likes =
        interactions::like_post(post_id, user.member_id, user.is_admin, &state.db_pool).await?;
    Ok(Json(json!({ "likes": likes })))
}

/// PUT /posts/:id/unlike
pub async fn unlike_post(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    let likes =
        interactions::unlike_post(post_id, user.member_id, user.is_admin, &state.db_pool).await?;
    Ok(Json(json!({ "likes": likes })))
}

/// POST /posts/:id/report
pub async fn report_post(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<PostId>,
    Json(input): Json<ReportInput>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    interactions::report_post(
        post_id,
        user.member_id,
        user.is_admin,
        input.reason,
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(json!({ "reported": true }))))
}
