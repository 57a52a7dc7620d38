//! Registrations domain - event signups
//!
//! Covers the registration workflow itself plus the owner-facing reads:
//! registration lists, per-event tallies, and the CSV export.

pub mod actions;
pub mod data;
pub mod models;

pub use models::registration::{Registration, TicketSelection};
