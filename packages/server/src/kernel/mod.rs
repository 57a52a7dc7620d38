//! Infrastructure shared across domains: outbound media purging and the
//! in-process task scheduler.

pub mod media;
pub mod scheduled_tasks;

pub use media::MediaPurger;
