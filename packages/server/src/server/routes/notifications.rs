//! Notification feed route.

use axum::extract::Extension;
use axum::Json;
use serde_json::json;

use crate::domains::notifications::Notification;
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::RequireAuth;

/// GET /notifications
///
/// Recent notifications for the caller: addressed rows plus broadcasts,
/// newest first, five-day window, capped at 50. Report rows only show up
/// for admins.
pub async fn list_notifications(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<serde_json::Value>> {
    let notifications =
        Notification::feed_for_member(user.member_id, user.is_admin, &state.db_pool).await?;
    Ok(Json(json!({ "notifications": notifications })))
}
