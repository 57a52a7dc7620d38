//! Member domain - platform identities
//!
//! Members are created by the external identity flow (Google sign-in or
//! password signup); this backend treats them as an identity source and a
//! snapshot provider for post/comment authorship.

pub mod models;

pub use models::member::Member;
