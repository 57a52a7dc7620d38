//! Admin moderation routes.

use axum::extract::{Extension, Path};
use axum::Json;
use serde_json::json;

use crate::common::PostId;
use crate::domains::posts::actions::moderation;
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::RequireAdmin;

/// GET /users/admin/pending-events
pub async fn pending_events(
    Extension(state): Extension<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> ApiResult<Json<serde_json::Value>> {
    let posts = moderation::pending_events(&state.db_pool).await?;
    Ok(Json(json!({ "events": posts })))
}

/// PUT /users/admin/approve-event/:id
pub async fn approve_event(
    Extension(state): Extension<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    let post = moderation::approve_event(post_id, &state.db_pool).await?;
    Ok(Json(json!({ "post": post })))
}

/// DELETE /users/admin/reject-event/:id
pub async fn reject_event(
    Extension(state): Extension<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(post_id): Path<PostId>,
) -> ApiResult<Json<serde_json::Value>> {
    moderation::reject_event(post_id, &state.db_pool).await?;
    Ok(Json(json!({ "rejected": true })))
}
