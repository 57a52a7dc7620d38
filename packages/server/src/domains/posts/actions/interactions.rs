//! Interaction actions - like/unlike, comment, report
//!
//! Likes and comments are rows in their own tables; counts are derived,
//! so the guard conditions fall out of the storage constraints.

use sqlx::PgPool;

use crate::common::{MemberId, PostId};
use crate::domains::member::Member;
use crate::domains::notifications::{Notification, NotificationKind};
use crate::domains::posts::models::{Comment, Post, PostLike, PostStatus};
use crate::server::error::{ApiError, ApiResult};

/// Load a post for interaction: it must exist and be visible to the actor.
async fn visible_post(post_id: PostId, is_admin: bool, pool: &PgPool) -> ApiResult<Post> {
    let post = Post::find_by_id(post_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("post".into()))?;

    if post.status != PostStatus::Approved.to_string() && !is_admin {
        return Err(ApiError::NotFound("post".into()));
    }

    Ok(post)
}

/// Like a post. A second like from the same member is a conflict.
/// Returns the new like count.
pub async fn like_post(
    post_id: PostId,
    member_id: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> ApiResult<i64> {
    let post = visible_post(post_id, is_admin, pool).await?;

    let inserted = PostLike::insert(post_id, member_id, pool).await?;
    if !inserted {
        return Err(ApiError::Conflict("already liked".into()));
    }

    // Liking your own post stays silent.
    if post.author_id != member_id {
        let liker = Member::find_by_id(member_id, pool)
            .await?
            .ok_or(ApiError::Unauthorized)?;
        Notification::emit(
            NotificationKind::Like,
            format!("{} liked your post \"{}\"", liker.display_name, post.title),
            Some(post.author_id),
            Some(post.id),
            pool,
        )
        .await?;
    }

    let count = PostLike::count_for_post(post_id, pool).await?;
    Ok(count)
}

/// Remove a like. Unliking a post that was never liked is a bad request.
/// Returns the new like count.
pub async fn unlike_post(
    post_id: PostId,
    member_id: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> ApiResult<i64> {
    visible_post(post_id, is_admin, pool).await?;

    let removed = PostLike::remove(post_id, member_id, pool).await?;
    if !removed {
        return Err(ApiError::Validation("post is not liked".into()));
    }

    let count = PostLike::count_for_post(post_id, pool).await?;
    Ok(count)
}

/// Append a comment. Blank bodies are rejected.
pub async fn add_comment(
    post_id: PostId,
    member_id: MemberId,
    is_admin: bool,
    body: String,
    pool: &PgPool,
) -> ApiResult<Comment> {
    if body.trim().is_empty() {
        return Err(ApiError::Validation("comment must not be empty".into()));
    }

    let post = visible_post(post_id, is_admin, pool).await?;

    let author = Member::find_by_id(member_id, pool)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let comment = Comment::create(
        post_id,
        author.id,
        author.display_name.clone(),
        author.avatar_url.clone(),
        body,
        pool,
    )
    .await?;

    if post.author_id != member_id {
        Notification::emit(
            NotificationKind::Comment,
            format!(
                "{} commented on your post \"{}\"",
                author.display_name, post.title
            ),
            Some(post.author_id),
            Some(post.id),
            pool,
        )
        .await?;
    }

    Ok(comment)
}

/// Report a post to the admins. Does not mutate the post itself.
pub async fn report_post(
    post_id: PostId,
    reporter_id: MemberId,
    is_admin: bool,
    reason: String,
    pool: &PgPool,
) -> ApiResult<()> {
    if reason.trim().is_empty() {
        return Err(ApiError::Validation("report reason must not be empty".into()));
    }

    let post = visible_post(post_id, is_admin, pool).await?;

    let reporter = Member::find_by_id(reporter_id, pool)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Notification::emit_report(
        format!(
            "{} reported the post \"{}\"",
            reporter.display_name, post.title
        ),
        post.id,
        reporter.id,
        reason,
        pool,
    )
    .await?;

    Ok(())
}
