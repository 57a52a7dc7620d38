use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CommentId, MemberId, PostId};

/// Comment - a reply attached to a post
///
/// Carries an author snapshot like the post itself. The per-post comment
/// count is always COUNT(*) over this table, never a stored field.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: MemberId,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Append a comment to a post.
    pub async fn create(
        post_id: PostId,
        author_id: MemberId,
        author_name: String,
        author_avatar: Option<String>,
        body: String,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO post_comments (id, post_id, author_id, author_name, author_avatar, body)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(CommentId::new())
        .bind(post_id)
        .bind(author_id)
        .bind(author_name)
        .bind(author_avatar)
        .bind(body)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All comments on a post, oldest first.
    pub async fn find_for_post(post_id: PostId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM post_comments
             WHERE post_id = $1
             ORDER BY created_at ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Comment count for a post.
    pub async fn count_for_post(post_id: PostId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
