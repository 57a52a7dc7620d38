//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use sqlx::PgPool;

use server_core::domains::member::Member;
use server_core::domains::posts::models::{
    CulturalEventDetails, EventDetails, PaymentConfig, Post, PostDetails, PostStatus, TicketOption,
};

/// Create a regular test member
pub async fn create_member(pool: &PgPool, name: &str) -> Result<Member> {
    Member::create(name.to_string(), None, false, pool).await
}

/// Create an admin test member
pub async fn create_admin(pool: &PgPool) -> Result<Member> {
    Member::create("Admin".to_string(), None, true, pool).await
}

/// Create a post with the given payload and status
pub async fn create_post_with_status(
    pool: &PgPool,
    author: &Member,
    title: &str,
    details: PostDetails,
    status: PostStatus,
) -> Result<Post> {
    Post::create(
        author.id,
        author.display_name.clone(),
        author.avatar_url.clone(),
        title.to_string(),
        "Fixture body text".to_string(),
        Vec::new(),
        details,
        status,
        pool,
    )
    .await
}

/// Create an approved confession
pub async fn create_confession(pool: &PgPool, author: &Member, title: &str) -> Result<Post> {
    create_post_with_status(pool, author, title, PostDetails::Confession, PostStatus::Approved)
        .await
}

/// Create an approved free event that accepts registrations
pub async fn create_free_event(pool: &PgPool, author: &Member, title: &str) -> Result<Post> {
    create_post_with_status(
        pool,
        author,
        title,
        PostDetails::Event(EventDetails::default()),
        PostStatus::Approved,
    )
    .await
}

/// Create an approved event with the given payload
pub async fn create_event(
    pool: &PgPool,
    author: &Member,
    title: &str,
    details: EventDetails,
) -> Result<Post> {
    create_post_with_status(
        pool,
        author,
        title,
        PostDetails::Event(details),
        PostStatus::Approved,
    )
    .await
}

/// Create an approved cultural event with ticket options and dates
pub async fn create_cultural_event(
    pool: &PgPool,
    author: &Member,
    title: &str,
    options: &[(&str, i64)],
    dates: &[&str],
    payment: PaymentConfig,
) -> Result<Post> {
    let details = CulturalEventDetails {
        ticket_options: options
            .iter()
            .map(|(name, price)| TicketOption {
                name: name.to_string(),
                price: *price,
            })
            .collect(),
        available_dates: dates.iter().map(|d| d.to_string()).collect(),
        payment,
    };
    create_post_with_status(
        pool,
        author,
        title,
        PostDetails::CulturalEvent(details),
        PostStatus::Approved,
    )
    .await
}

/// A registration body with valid contact fields and no payment proof.
pub fn basic_registration_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Asha Rao",
        "email": "asha@example.edu",
        "phone": "9999999999"
    })
}
