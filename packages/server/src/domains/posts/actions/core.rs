//! Post CRUD actions - entry-point functions for post operations
//!
//! Actions are self-contained: they take raw input, handle lookups,
//! ownership checks, and return final models. Route handlers stay thin.

use sqlx::PgPool;
use tracing::info;

use crate::common::{MemberId, PostId};
use crate::domains::member::Member;
use crate::domains::posts::data::{EditPostInput, PostWithComments, SubmitPostInput};
use crate::domains::posts::models::{Comment, Post, PostFeedItem, PostStatus};
use crate::kernel::media::MediaPurger;
use crate::server::error::{ApiError, ApiResult};

/// Submit a post. Event-type posts enter the moderation queue as
/// `pending`; everything else is publicly visible immediately.
pub async fn submit_post(
    author_id: MemberId,
    input: SubmitPostInput,
    pool: &PgPool,
) -> ApiResult<Post> {
    if input.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if input.body.trim().is_empty() {
        return Err(ApiError::Validation("body must not be empty".into()));
    }

    let author = Member::find_by_id(author_id, pool)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let kind = input.details.kind();
    let status = if kind.requires_moderation() {
        PostStatus::Pending
    } else {
        PostStatus::Approved
    };

    info!(author_id = %author_id, post_type = %kind, "submitting post");

    let post = Post::create(
        author.id,
        author.display_name,
        author.avatar_url,
        input.title,
        input.body,
        input.images,
        input.details,
        status,
        pool,
    )
    .await?;

    Ok(post)
}

/// List posts for the feed. Non-admin viewers only see approved content.
pub async fn list_posts(
    viewer: Option<MemberId>,
    is_admin: bool,
    post_type: Option<&str>,
    limit: i64,
    offset: i64,
    pool: &PgPool,
) -> ApiResult<Vec<PostFeedItem>> {
    let items = Post::feed(viewer, is_admin, post_type, limit, offset, pool).await?;
    Ok(items)
}

/// Fetch a single post with its comment thread.
pub async fn get_post(
    post_id: PostId,
    viewer: Option<MemberId>,
    is_admin: bool,
    pool: &PgPool,
) -> ApiResult<PostWithComments> {
    let post = Post::find_feed_item(post_id, viewer, is_admin, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("post".into()))?;

    let comments = Comment::find_for_post(post_id, pool).await?;

    Ok(PostWithComments { post, comments })
}

/// Edit a post. Owner or admin only; the post type never changes.
pub async fn edit_post(
    post_id: PostId,
    actor_id: MemberId,
    is_admin: bool,
    input: EditPostInput,
    pool: &PgPool,
) -> ApiResult<Post> {
    let post = Post::find_by_id(post_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("post".into()))?;

    if post.author_id != actor_id && !is_admin {
        return Err(ApiError::Forbidden("only the author or an admin may edit".into()));
    }

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("title must not be empty".into()));
        }
    }
    if let Some(details) = &input.details {
        if details.kind().to_string() != post.post_type {
            return Err(ApiError::Validation(
                "post type cannot change on edit".into(),
            ));
        }
    }

    let updated = Post::update_content(
        post_id,
        input.title,
        input.body,
        input.images,
        input.details.as_ref(),
        pool,
    )
    .await?;

    Ok(updated)
}

/// Delete a post. Owner or admin only. Registrations, comments, likes and
/// notifications referencing the post are removed by cascade; image assets
/// are purged best-effort afterwards (failures are logged, never fatal).
pub async fn delete_post(
    post_id: PostId,
    actor_id: MemberId,
    is_admin: bool,
    media: &MediaPurger,
    pool: &PgPool,
) -> ApiResult<()> {
    let post = Post::find_by_id(post_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("post".into()))?;

    if post.author_id != actor_id && !is_admin {
        return Err(ApiError::Forbidden(
            "only the author or an admin may delete".into(),
        ))
    }

    info!(post_id = %post_id, actor_id = %actor_id, "deleting post");

    Post::delete(post_id, pool).await?;

    // The post row is gone; orphaned assets are a cleanup concern only.
    media.purge_post_assets(&post).await;

    Ok(())
}
