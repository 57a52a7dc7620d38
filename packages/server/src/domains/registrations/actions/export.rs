//! Registration CSV export
//!
//! Flattens an event's registrations into a tabular document: one output
//! row per ticket selection (contact fields repeated), a single row for
//! ticketless registrations, and a column set that unions every custom
//! field key seen across the event.

use sqlx::PgPool;
use std::collections::BTreeSet;

use crate::common::{MemberId, PostId};
use crate::domains::posts::models::{Post, PostKind};
use crate::domains::registrations::models::Registration;
use crate::server::error::{ApiError, ApiResult};

/// A rendered export: the suggested filename plus the CSV body.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

pub async fn export_registrations(
    event_id: PostId,
    actor_id: MemberId,
    is_admin: bool,
    pool: &PgPool,
) -> ApiResult<CsvExport> {
    let post = Post::find_by_id(event_id, pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("event".into()))?;

    let kind: PostKind = post.post_type.parse()?;
    if !kind.requires_moderation() {
        return Err(ApiError::NotFound("event".into()));
    }
    if post.author_id != actor_id && !is_admin {
        return Err(ApiError::Forbidden(
            "only the event owner or an admin may export".into(),
        ));
    }

    let registrations = Registration::find_by_event(event_id, pool).await?;
    if registrations.is_empty() {
        return Err(ApiError::NotFound("no registrations".into()));
    }

    Ok(CsvExport {
        filename: format!("{}_registrations.csv", sanitize_filename(&post.title)),
        content: build_csv(&registrations),
    })
}

/// Render registrations as CSV. Ticket columns appear only when at least
/// one registration carries ticket selections.
fn build_csv(registrations: &[Registration]) -> String {
    // Column set: fixed, then every custom key observed (sorted), then
    // ticket columns when used.
    let custom_keys: BTreeSet<&str> = registrations
        .iter()
        .flat_map(|r| r.custom_fields.0.keys().map(String::as_str))
        .collect();
    let has_tickets = registrations.iter().any(|r| !r.tickets.0.is_empty());

    let mut header: Vec<&str> = vec!["Name", "Email", "Phone", "Transaction ID", "Registered At"];
    header.extend(custom_keys.iter().copied());
    if has_tickets {
        header.extend([
            "Booking Dates",
            "Ticket Type",
            "Ticket Quantity",
            "Ticket Price",
            "Total Price",
        ]);
    }

    let mut out = String::new();
    write_row(&mut out, header.iter().map(|s| s.to_string()));

    for reg in registrations {
        let fixed = |ticket: Option<(&str, i64, i64)>| {
            let mut cells: Vec<String> = vec![
                reg.name.clone(),
                reg.email.clone(),
                reg.phone.clone(),
                reg.transaction_id.clone().unwrap_or_default(),
                reg.created_at.to_rfc3339(),
            ];
            for key in &custom_keys {
                cells.push(reg.custom_fields.0.get(*key).cloned().unwrap_or_default());
            }
            if has_tickets {
                cells.push(reg.booking_dates.join("; "));
                match ticket {
                    Some((name, quantity, price)) => {
                        cells.push(name.to_string());
                        cells.push(quantity.to_string());
                        cells.push(price.to_string());
                    }
                    None => {
                        cells.push(String::new());
                        cells.push(String::new());
                        cells.push(String::new());
                    }
                }
                // The registration's full total on every row; never split
                // across ticket lines.
                cells.push(reg.total_price.to_string());
            }
            cells
        };

        if reg.tickets.0.is_empty() {
            write_row(&mut out, fixed(None).into_iter());
        } else {
            for ticket in &reg.tickets.0 {
                write_row(
                    &mut out,
                    fixed(Some((
                        ticket.ticket_type.as_str(),
                        ticket.quantity,
                        ticket.ticket_price,
                    )))
                    .into_iter(),
                );
            }
        }
    }

    out
}

/// RFC 4180 quoting: fields containing separators, quotes or newlines are
/// wrapped and inner quotes doubled.
fn write_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        if cell.contains([',', '"', '\n', '\r']) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(&cell);
        }
    }
    out.push_str("\r\n");
}

/// Reduce an event title to a safe ASCII filename stem.
fn sanitize_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stem = stem.trim_matches('_').to_string();
    if stem.is_empty() {
        "event".to_string()
    } else {
        stem
    }
}
