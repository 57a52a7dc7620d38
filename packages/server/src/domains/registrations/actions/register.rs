//! Event registration workflow
//!
//! Loads the event, validates contact fields and payment proof, prices
//! cultural-event ticket selections, and inserts the registration. The
//! at-most-one-per-member rule is the storage constraint; a duplicate
//! insert comes back as a unique violation and is surfaced as a conflict.

use sqlx::PgPool;
use tracing::info;

use crate::common::{MemberId, PostId};
use crate::domains::notifications::{Notification, NotificationKind};
use crate::domains::posts::models::{
    CulturalEventDetails, PaymentConfig, PaymentMethod, Post, PostDetails, PostStatus,
};
use crate::domains::registrations::data::{RegisterInput, TicketPick};
use crate::domains::registrations::models::{Registration, TicketSelection};
use crate::server::error::{ApiError, ApiResult};

/// Minimum accepted transaction-id length when one is required.
const MIN_TRANSACTION_ID_LEN: usize = 4;

pub async fn register_for_event(
    event_id: PostId,
    member_id: MemberId,
    input: RegisterInput,
    pool: &PgPool,
) -> ApiResult<Registration> {
    let post = Post::find_by_id(event_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("event".into()))?;

    // Only approved event-type posts accept registrations; everything else
    // is indistinguishable from a missing event to the caller.
    if post.status != PostStatus::Approved.to_string() {
        return Err(ApiError::NotFound("event".into()));
    }

    if Registration::exists(event_id, member_id, pool).await? {
        return Err(ApiError::Conflict("already registered".into()));
    }

    require_contact_fields(&input)?;

    let (tickets, booking_dates, total_price) = match &post.details.0 {
        PostDetails::Event(details) => {
            if !details.registration_open {
                return Err(ApiError::Validation(
                    "registration is closed for this event".into(),
                ));
            }
            // Plain events require payment proof only for priced entry
            // collected over QR.
            if details.price > 0 && details.payment.method == PaymentMethod::Qr {
                require_payment_proof(&details.payment, &input)?;
            }
            (Vec::new(), Vec::new(), details.price)
        }
        PostDetails::CulturalEvent(details) => {
            let tickets = resolve_tickets(details, &input.tickets)?;
            let dates = validate_booking_dates(details, &input.booking_dates)?;
            let total = cultural_total(&tickets, dates.len());
            if total > 0 && details.payment.is_configured() {
                require_payment_proof(&details.payment, &input)?;
            }
            (tickets, dates, total)
        }
        PostDetails::Confession | PostDetails::News => {
            return Err(ApiError::NotFound("event".into()));
        }
    };

    let inserted = Registration::insert(
        event_id,
        member_id,
        input.name,
        input.email,
        input.phone,
        input.transaction_id,
        input.payment_screenshot,
        booking_dates,
        tickets,
        total_price,
        input.custom_fields,
        pool,
    )
    .await;

    let registration = match inserted {
        Ok(r) => r,
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(ApiError::Conflict("already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        event_id = %event_id,
        member_id = %member_id,
        total_price,
        "registration created"
    );

    Notification::emit(
        NotificationKind::Registration,
        format!("{} registered for \"{}\"", registration.name, post.title),
        Some(post.author_id),
        Some(post.id),
        pool,
    )
    .await?;

    Ok(registration)
}

/// Contact fields are mandatory for every registration; the error lists
/// every missing one at once.
fn require_contact_fields(input: &RegisterInput) -> ApiResult<()> {
    let mut missing = Vec::new();
    if input.name.trim().is_empty() {
        missing.push("name");
    }
    if input.email.trim().is_empty() {
        missing.push("email");
    }
    if input.phone.trim().is_empty() {
        missing.push("phone");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// One payment-proof rule for both event variants: a screenshot when the
/// organizer demands one, a transaction id otherwise.
fn require_payment_proof(payment: &PaymentConfig, input: &RegisterInput) -> ApiResult<()> {
    if payment.require_screenshot {
        if input
            .payment_screenshot
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
        {
            return Err(ApiError::Validation(
                "payment screenshot is required".into(),
            ));
        }
    } else {
        match input.transaction_id.as_deref().map(str::trim) {
            Some(id) if id.len() >= MIN_TRANSACTION_ID_LEN => {}
            _ => {
                return Err(ApiError::Validation(format!(
                    "transaction id of at least {} characters is required",
                    MIN_TRANSACTION_ID_LEN
                )));
            }
        }
    }
    Ok(())
}

/// Resolve ticket picks against the event's option list. Prices always
/// come from the event; unknown option names and empty selections are
/// rejected.
fn resolve_tickets(
    details: &CulturalEventDetails,
    picks: &[TicketPick],
) -> ApiResult<Vec<TicketSelection>> {
    let selected: Vec<&TicketPick> = picks.iter().filter(|p| p.quantity > 0).collect();
    if selected.is_empty() {
        return Err(ApiError::Validation(
            "at least one ticket with quantity > 0 is required".into(),
        ));
    }

    selected
        .into_iter()
        .map(|pick| {
            let option = details
                .ticket_options
                .iter()
                .find(|o| o.name == pick.ticket_type)
                .ok_or_else(|| {
                    ApiError::Validation(format!("unknown ticket type: {}", pick.ticket_type))
                })?;
            Ok(TicketSelection {
                ticket_type: option.name.clone(),
                ticket_price: option.price,
                quantity: pick.quantity,
            })
        })
        .collect()
}

/// When the event offers dates, at least one must be booked and every
/// booked date must be on offer.
fn validate_booking_dates(
    details: &CulturalEventDetails,
    booked: &[String],
) -> ApiResult<Vec<String>> {
    if details.available_dates.is_empty() {
        return Ok(booked.to_vec());
    }
    if booked.is_empty() {
        return Err(ApiError::Validation(
            "at least one booking date is required".into(),
        ));
    }
    for date in booked {
        if !details.available_dates.contains(date) {
            return Err(ApiError::Validation(format!(
                "date is not offered: {}",
                date
            )));
        }
    }
    Ok(booked.to_vec())
}

/// Total price for a cultural-event registration.
///
/// A registration with zero booked dates still prices as a single day.
fn cultural_total(tickets: &[TicketSelection], date_count: usize) -> i64 {
    let per_day: i64 = tickets
        .iter()
        .map(|t| t.ticket_price * t.quantity)
        .sum();
    per_day * date_count.max(1) as i64
}
