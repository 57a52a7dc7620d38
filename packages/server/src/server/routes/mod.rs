// HTTP routes
pub mod admin;
pub mod cron;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod users;
