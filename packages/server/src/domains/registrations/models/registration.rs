use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::common::{MemberId, PostId, RegistrationId};

/// One resolved ticket line on a registration. The price is looked up
/// from the event's ticket options at registration time, never taken
/// from the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketSelection {
    pub ticket_type: String,
    /// Whole currency units.
    pub ticket_price: i64,
    pub quantity: i64,
}

/// Registration - one member's signup for one event post
///
/// The UNIQUE (event_id, member_id) constraint is the source of truth for
/// at-most-one-registration-per-member; duplicate inserts surface as a
/// unique violation that callers map to a conflict.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: PostId,
    pub member_id: MemberId,

    // Contact fields
    pub name: String,
    pub email: String,
    pub phone: String,

    // Payment proof
    pub transaction_id: Option<String>,
    pub payment_screenshot: Option<String>,

    // Cultural-event selections
    pub booking_dates: Vec<String>,
    pub tickets: Json<Vec<TicketSelection>>,

    /// Whole currency units.
    pub total_price: i64,

    /// Organizer-defined extra fields, collected verbatim.
    pub custom_fields: Json<BTreeMap<String, String>>,

    pub created_at: DateTime<Utc>,
}

/// Per-event registration tally for an owner's dashboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RegistrationCount {
    pub event_id: PostId,
    pub title: String,
    pub registrations: i64,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Registration {
    /// Insert a registration.
    ///
    /// Returns the raw `sqlx::Error` so the caller can distinguish the
    /// unique-constraint conflict from other storage failures.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        event_id: PostId,
        member_id: MemberId,
        name: String,
        email: String,
        phone: String,
        transaction_id: Option<String>,
        payment_screenshot: Option<String>,
        booking_dates: Vec<String>,
        tickets: Vec<TicketSelection>,
        total_price: i64,
        custom_fields: BTreeMap<String, String>,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO registrations (
                id, event_id, member_id, name, email, phone,
                transaction_id, payment_screenshot, booking_dates,
                tickets, total_price, custom_fields
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *",
        )
        .bind(RegistrationId::new())
        .bind(event_id)
        .bind(member_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(transaction_id)
        .bind(payment_screenshot)
        .bind(&booking_dates)
        .bind(Json(tickets))
        .bind(total_price)
        .bind(Json(custom_fields))
        .fetch_one(pool)
        .await
    }

    /// Whether a member already holds a registration for an event.
    ///
    /// Used for the friendly early conflict; the unique constraint remains
    /// the authority under concurrent inserts.
    pub async fn exists(
        event_id: PostId,
        member_id: MemberId,
        pool: &PgPool,
    ) -> anyhow::Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE event_id = $1 AND member_id = $2)",
        )
        .bind(event_id)
        .bind(member_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All registrations for one event, newest first.
    pub async fn find_by_event(event_id: PostId, pool: &PgPool) -> anyhow::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM registrations
             WHERE event_id = $1
             ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// All registrations across every event a member owns, newest first.
    pub async fn find_for_owner(owner_id: MemberId, pool: &PgPool) -> anyhow::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT r.* FROM registrations r
             JOIN posts p ON p.id = r.event_id
             WHERE p.author_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Registration tallies per owned event, derived in one aggregation
    /// query rather than per-post counting.
    pub async fn counts_for_owner(
        owner_id: MemberId,
        pool: &PgPool,
    ) -> anyhow::Result<Vec<RegistrationCount>> {
        sqlx::query_as::<_, RegistrationCount>(
            "SELECT p.id AS event_id, p.title, COUNT(r.id) AS registrations
             FROM posts p
             LEFT JOIN registrations r ON r.event_id = p.id
             WHERE p.author_id = $1
               AND p.post_type IN ('event', 'cultural_event')
             GROUP BY p.id, p.title, p.created_at
             ORDER BY p.created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
