//! Moderation actions - the pending/approved lifecycle for event posts
//!
//! Only event-type posts pass through moderation. Rejection deletes the
//! post outright; it is not a third status value.

use sqlx::PgPool;
use tracing::info;

use crate::common::PostId;
use crate::domains::notifications::{Notification, NotificationKind};
use crate::domains::posts::models::{Post, PostKind, PostStatus};
use crate::server::error::{ApiError, ApiResult};

/// Pending event-type posts awaiting a moderation decision.
pub async fn pending_events(pool: &PgPool) -> ApiResult<Vec<Post>> {
    let posts = Post::find_pending_events(pool).await?;
    Ok(posts)
}

/// Approve a pending event. Fails on missing posts, on non-event types,
/// and on posts that are not pending.
pub async fn approve_event(post_id: PostId, pool: &PgPool) -> ApiResult<Post> {
    let post = Post::find_by_id(post_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("post".into()))?;

    let kind: PostKind = post.post_type.parse()?;
    if !kind.requires_moderation() {
        return Err(ApiError::Validation(
            "only events and cultural events are moderated".into(),
        ));
    }
    if post.status != PostStatus::Pending.to_string() {
        return Err(ApiError::Validation("post is not pending".into()));
    }

    info!(post_id = %post_id, "approving event");

    let approved = Post::update_status(post_id, PostStatus::Approved, pool).await?;

    Notification::emit(
        NotificationKind::Success,
        format!("Your event \"{}\" has been approved", approved.title),
        Some(approved.author_id),
        Some(approved.id),
        pool,
    )
    .await?;

    Ok(approved)
}

/// Reject a pending event by deleting it. Registrations and notifications
/// referencing it are removed by cascade.
pub async fn reject_event(post_id: PostId, pool: &PgPool) -> ApiResult<()> {
    let post = Post::find_by_id(post_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("post".into()))?;

    let kind: PostKind = post.post_type.parse()?;
    if !kind.requires_moderation() {
        return Err(ApiError::Validation(
            "only events and cultural events are moderated".into(),
        ));
    }

    info!(post_id = %post_id, "rejecting event");

    Post::delete(post_id, pool).await?;

    // No post_id here: the referenced row is already gone and the cascade
    // would otherwise take this notification with it.
    Notification::emit(
        NotificationKind::Warning,
        format!("Your event \"{}\" was rejected", post.title),
        Some(post.author_id),
        None,
        pool,
    )
    .await?;

    Ok(())
}
