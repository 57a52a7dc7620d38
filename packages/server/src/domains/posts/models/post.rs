use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::common::{MemberId, PostId};

/// Post - a unit of user-submitted content
///
/// The row keeps a string discriminator in `post_type` for query
/// predicates; the variant payload itself lives in `details` as one
/// exhaustive enum, so a post can never carry another type's fields.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub author_id: MemberId,

    // Author snapshot, frozen at submission time
    pub author_name: String,
    pub author_avatar: Option<String>,

    // Content
    pub title: String,
    pub body: String,
    pub images: Vec<String>,

    // 'confession', 'event', 'cultural_event', 'news'
    pub post_type: String,
    pub details: Json<PostDetails>,

    // 'pending', 'approved'; only event types ever start pending
    pub status: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Enums and variant payloads
// =============================================================================

/// Post type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Confession,
    Event,
    CulturalEvent,
    News,
}

impl PostKind {
    /// Only event-type posts pass through the moderation queue.
    pub fn requires_moderation(&self) -> bool {
        matches!(self, PostKind::Event | PostKind::CulturalEvent)
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostKind::Confession => write!(f, "confession"),
            PostKind::Event => write!(f, "event"),
            PostKind::CulturalEvent => write!(f, "cultural_event"),
            PostKind::News => write!(f, "news"),
        }
    }
}

impl std::str::FromStr for PostKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "confession" => Ok(PostKind::Confession),
            "event" => Ok(PostKind::Event),
            "cultural_event" => Ok(PostKind::CulturalEvent),
            "news" => Ok(PostKind::News),
            _ => Err(anyhow::anyhow!("Invalid post type: {}", s)),
        }
    }
}

/// Moderation status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Pending,
    Approved,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Pending => write!(f, "pending"),
            PostStatus::Approved => write!(f, "approved"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(PostStatus::Pending),
            "approved" => Ok(PostStatus::Approved),
            _ => Err(anyhow::anyhow!("Invalid post status: {}", s)),
        }
    }
}

/// Variant payload per post type.
///
/// Constructing a post with one variant makes the other variants'
/// fields unrepresentable, so no write path has to clear foreign-type
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostDetails {
    Confession,
    News,
    Event(EventDetails),
    CulturalEvent(CulturalEventDetails),
}

impl PostDetails {
    pub fn kind(&self) -> PostKind {
        match self {
            PostDetails::Confession => PostKind::Confession,
            PostDetails::News => PostKind::News,
            PostDetails::Event(_) => PostKind::Event,
            PostDetails::CulturalEvent(_) => PostKind::CulturalEvent,
        }
    }
}

/// Payment configuration shared by both event variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentConfig {
    #[serde(default)]
    pub method: PaymentMethod,
    pub link: Option<String>,
    pub qr_image: Option<String>,
    /// When set, a payment screenshot is the required proof; otherwise a
    /// transaction id is.
    #[serde(default)]
    pub require_screenshot: bool,
}

impl PaymentConfig {
    /// Whether any payment channel is configured at all.
    pub fn is_configured(&self) -> bool {
        self.method != PaymentMethod::None
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    None,
    Qr,
    Link,
}

/// Payload for plain events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventDetails {
    pub location: Option<String>,
    pub venue_address: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Entry price in whole currency units; 0 means free.
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default = "default_registration_open")]
    pub registration_open: bool,
    /// Names of extra fields the organizer collects at registration.
    #[serde(default)]
    pub custom_fields: Vec<String>,
}

fn default_registration_open() -> bool {
    true
}

/// Payload for cultural events (ticketed, multi-date).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CulturalEventDetails {
    #[serde(default)]
    pub ticket_options: Vec<TicketOption>,
    /// Offered dates, as opaque date strings chosen by the organizer.
    #[serde(default)]
    pub available_dates: Vec<String>,
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// A named, priced ticket category a cultural event offers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketOption {
    pub name: String,
    /// Whole currency units.
    pub price: i64,
}

// =============================================================================
// Feed row (post + derived counts)
// =============================================================================

/// A post as it appears in list queries, with like/comment counts derived
/// from their source tables.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostFeedItem {
    pub id: PostId,
    pub author_id: MemberId,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub title: String,
    pub body: String,
    pub images: Vec<String>,
    pub post_type: String,
    pub details: Json<PostDetails>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_viewer: bool,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Post {
    /// Find post by ID
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Create a new post (returns inserted record)
    pub async fn create(
        author_id: MemberId,
        author_name: String,
        author_avatar: Option<String>,
        title: String,
        body: String,
        images: Vec<String>,
        details: PostDetails,
        status: PostStatus,
        pool: &PgPool,
    ) -> Result<Self> {
        let post_type = details.kind().to_string();
        sqlx::query_as::<_, Self>(
            "INSERT INTO posts (
                id, author_id, author_name, author_avatar,
                title, body, images, post_type, details, status
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(PostId::new())
        .bind(author_id)
        .bind(author_name)
        .bind(author_avatar)
        .bind(title)
        .bind(body)
        .bind(&images)
        .bind(post_type)
        .bind(Json(details))
        .bind(status.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Feed query: newest first, with derived counts and a per-viewer
    /// liked flag. Non-admin viewers only see approved posts.
    pub async fn feed(
        viewer: Option<MemberId>,
        include_pending: bool,
        post_type: Option<&str>,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<PostFeedItem>> {
        sqlx::query_as::<_, PostFeedItem>(
            "SELECT p.*,
                    (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count,
                    (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count,
                    CASE WHEN $1::uuid IS NULL THEN FALSE
                         ELSE EXISTS(SELECT 1 FROM post_likes l
                                     WHERE l.post_id = p.id AND l.member_id = $1)
                    END AS liked_by_viewer
             FROM posts p
             WHERE ($2 OR p.status = 'approved')
               AND ($3::text IS NULL OR p.post_type = $3)
             ORDER BY p.created_at DESC
             LIMIT $4 OFFSET $5",
        )
        .bind(viewer)
        .bind(include_pending)
        .bind(post_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Single post with derived counts, same visibility rule as `feed`.
    pub async fn find_feed_item(
        id: PostId,
        viewer: Option<MemberId>,
        include_pending: bool,
        pool: &PgPool,
    ) -> Result<Option<PostFeedItem>> {
        sqlx::query_as::<_, PostFeedItem>(
            "SELECT p.*,
                    (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count,
                    (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count,
                    CASE WHEN $2::uuid IS NULL THEN FALSE
                         ELSE EXISTS(SELECT 1 FROM post_likes l
                                     WHERE l.post_id = p.id AND l.member_id = $2)
                    END AS liked_by_viewer
             FROM posts p
             WHERE p.id = $1
               AND ($3 OR p.status = 'approved')",
        )
        .bind(id)
        .bind(viewer)
        .bind(include_pending)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Pending event-type posts awaiting moderation, oldest first so the
    /// queue drains in submission order.
    pub async fn find_pending_events(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM posts
             WHERE status = 'pending'
               AND post_type IN ('event', 'cultural_event')
             ORDER BY created_at ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Update post content (owner edit). The variant payload is replaced
    /// wholesale when provided; the post type itself never changes.
    pub async fn update_content(
        id: PostId,
        title: Option<String>,
        body: Option<String>,
        images: Option<Vec<String>>,
        details: Option<&PostDetails>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE posts
             SET title = COALESCE($2, title),
                 body = COALESCE($3, body),
                 images = COALESCE($4, images),
                 details = COALESCE($5, details),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .bind(images)
        .bind(details.map(Json))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update moderation status
    pub async fn update_status(id: PostId, status: PostStatus, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE posts
             SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a post. Registrations, comments, likes and notifications
    /// referencing it go with it via ON DELETE CASCADE.
    pub async fn delete(id: PostId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
