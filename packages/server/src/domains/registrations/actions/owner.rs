//! Owner dashboard reads: registration lists and per-event tallies.

use sqlx::PgPool;

use crate::common::MemberId;
use crate::domains::registrations::models::{Registration, RegistrationCount};
use crate::server::error::ApiResult;

/// Every registration across the caller's own events, newest first.
pub async fn my_events_registrations(
    owner_id: MemberId,
    pool: &PgPool,
) -> ApiResult<Vec<Registration>> {
    let registrations = Registration::find_for_owner(owner_id, pool).await?;
    Ok(registrations)
}

/// Per-event registration counts for the caller's own events, computed in
/// a single aggregation query.
pub async fn registration_counts(
    owner_id: MemberId,
    pool: &PgPool,
) -> ApiResult<Vec<RegistrationCount>> {
    let counts = Registration::counts_for_owner(owner_id, pool).await?;
    Ok(counts)
}
