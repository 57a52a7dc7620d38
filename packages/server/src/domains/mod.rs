// Business domains
pub mod auth;
pub mod member;
pub mod notifications;
pub mod posts;
pub mod registrations;
