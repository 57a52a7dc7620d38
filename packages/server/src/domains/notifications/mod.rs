//! Notifications domain - the emitted side-effect log
//!
//! Registrations, reports, moderation decisions, likes and comments all
//! append rows here; users and admins read them back through
//! `GET /notifications`. Rows are immutable once written and removed either
//! by the retention sweep or by cascade when the referenced post goes away.

pub mod models;

pub use models::notification::{Notification, NotificationKind};
