use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::MemberId;

/// Member model - SQL persistence layer
///
/// `password_hash` is NULL for externally-authenticated accounts; this
/// service never reads it, token verification is the only auth gate.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Member {
    pub id: MemberId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: MemberId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert new member
    pub async fn create(
        display_name: String,
        avatar_url: Option<String>,
        is_admin: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO members (id, display_name, avatar_url, is_admin)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(MemberId::new())
        .bind(display_name)
        .bind(avatar_url)
        .bind(is_admin)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
