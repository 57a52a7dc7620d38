use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{MemberId, NotificationId, PostId};

/// How many days a notification stays visible in the feed.
const FEED_WINDOW_DAYS: i64 = 5;

/// Maximum number of rows returned by a feed query.
const FEED_LIMIT: i64 = 50;

/// How many days a notification is kept before the retention sweep
/// removes it.
const RETENTION_DAYS: i64 = 60;

/// Notification kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Warning,
    Success,
    Info,
    Report,
    Registration,
    Like,
    Comment,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Report => write!(f, "report"),
            NotificationKind::Registration => write!(f, "registration"),
            NotificationKind::Like => write!(f, "like"),
            NotificationKind::Comment => write!(f, "comment"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "warning" => Ok(NotificationKind::Warning),
            "success" => Ok(NotificationKind::Success),
            "info" => Ok(NotificationKind::Info),
            "report" => Ok(NotificationKind::Report),
            "registration" => Ok(NotificationKind::Registration),
            "like" => Ok(NotificationKind::Like),
            "comment" => Ok(NotificationKind::Comment),
            _ => Err(anyhow::anyhow!("Invalid notification kind: {}", s)),
        }
    }
}

/// Notification model - SQL persistence layer
///
/// A NULL `recipient_id` means the row is a broadcast; `report` rows are
/// additionally restricted to admin readers by the feed query.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: String,
    pub message: String,
    pub recipient_id: Option<MemberId>,
    pub post_id: Option<PostId>,
    pub reporter_id: Option<MemberId>,
    pub report_reason: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Append a notification row.
    pub async fn emit(
        kind: NotificationKind,
        message: String,
        recipient_id: Option<MemberId>,
        post_id: Option<PostId>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO notifications (id, kind, message, recipient_id, post_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(NotificationId::new())
        .bind(kind.to_string())
        .bind(message)
        .bind(recipient_id)
        .bind(post_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Append a report notification carrying the reporter and reason.
    pub async fn emit_report(
        message: String,
        post_id: PostId,
        reporter_id: MemberId,
        reason: String,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO notifications (id, kind, message, post_id, reporter_id, report_reason)
             VALUES ($1, 'report', $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(NotificationId::new())
        .bind(message)
        .bind(post_id)
        .bind(reporter_id)
        .bind(reason)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Recent notifications visible to a member: addressed to them or
    /// broadcast, within the feed window, newest first, capped.
    ///
    /// Report rows are admin-only.
    pub async fn feed_for_member(
        member_id: MemberId,
        is_admin: bool,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications
             WHERE (recipient_id = $1 OR recipient_id IS NULL)
               AND ($2 OR kind <> 'report')
               AND created_at > NOW() - make_interval(days => $3::int)
             ORDER BY created_at DESC
             LIMIT $4",
        )
        .bind(member_id)
        .bind(is_admin)
        .bind(FEED_WINDOW_DAYS)
        .bind(FEED_LIMIT)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Retention sweep: delete rows older than the retention horizon.
    /// Returns the number of rows removed.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications
             WHERE created_at < NOW() - make_interval(days => $1::int)",
        )
        .bind(RETENTION_DAYS)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
