//! Cron-style maintenance route.
//!
//! Deployments without the in-process scheduler point an external cron at
//! this endpoint instead.

use axum::extract::Extension;
use axum::Json;
use serde_json::json;

use crate::kernel::scheduled_tasks::run_notification_sweep;
use crate::server::app::AppState;
use crate::server::error::ApiResult;

/// GET /cron/cleanup
pub async fn cleanup(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = run_notification_sweep(&state.db_pool).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
