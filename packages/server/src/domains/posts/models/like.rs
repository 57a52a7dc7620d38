use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, PostId};

/// PostLike - one member's like on one post
///
/// The (post_id, member_id) primary key is the idempotency guard: a
/// second like is a conflict, and the like count is COUNT(*) over this
/// table so it can never drift from the set of likers.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostLike {
    pub post_id: PostId,
    pub member_id: MemberId,
    pub created_at: DateTime<Utc>,
}

impl PostLike {
    /// Insert a like. Returns false if the member had already liked the
    /// post (the insert hit the primary key).
    pub async fn insert(post_id: PostId, member_id: MemberId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            "INSERT INTO post_likes (post_id, member_id)
             VALUES ($1, $2)
             ON CONFLICT (post_id, member_id) DO NOTHING",
        )
        .bind(post_id)
        .bind(member_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns false if there was none to remove.
    pub async fn remove(post_id: PostId, member_id: MemberId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND member_id = $2")
            .bind(post_id)
            .bind(member_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Like count for a post.
    pub async fn count_for_post(post_id: PostId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
