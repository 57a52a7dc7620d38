//! Member-scoped registration routes: signup, owner dashboard, CSV export.

use axum::extract::{Extension, Path};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::common::PostId;
use crate::domains::registrations::actions::{export, owner, register};
use crate::domains::registrations::data::RegisterInput;
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::RequireAuth;

/// POST /users/register-event/:event_id
pub async fn register_for_event(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<PostId>,
    Json(input): Json<RegisterInput>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let registration =
        register::register_for_event(event_id, user.member_id, input, &state.db_pool).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "registration": registration })),
    ))
}

/// GET /users/my-events-registrations
pub async fn my_events_registrations(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<serde_json::Value>> {
    let registrations = owner::my_events_registrations(user.member_id, &state.db_pool).await?;
    Ok(Json(json!({ "registrations": registrations })))
}

/// GET /users/my-events/registration-counts
pub async fn registration_counts(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Json<serde_json::Value>> {
    let counts = owner::registration_counts(user.member_id, &state.db_pool).await?;
    Ok(Json(json!({ "counts": counts })))
}

/// GET /users/export-registrations/:event_id
///
/// Responds with a CSV document rather than JSON; the filename comes from
/// the sanitized event title.
pub async fn export_registrations(
    Extension(state): Extension<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<PostId>,
) -> ApiResult<Response> {
    let export =
        export::export_registrations(event_id, user.member_id, user.is_admin, &state.db_pool)
            .await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];

    Ok((headers, export.content).into_response())
}
