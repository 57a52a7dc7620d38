//! Request payloads for the registration workflow.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Body of `POST /users/register-event/:event_id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub transaction_id: Option<String>,
    pub payment_screenshot: Option<String>,
    /// Cultural events only: which of the offered dates to book.
    #[serde(default)]
    pub booking_dates: Vec<String>,
    /// Cultural events only: ticket picks by option name.
    #[serde(default)]
    pub tickets: Vec<TicketPick>,
    /// Organizer-defined extra fields, passed through verbatim.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

/// One ticket pick by option name; the price comes from the event.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketPick {
    pub ticket_type: String,
    #[serde(default)]
    pub quantity: i64,
}
