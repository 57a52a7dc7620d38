//! Auth domain - bearer-token authentication
//!
//! Token issuance lives with the external identity provider; this domain
//! only verifies tokens and exposes the claims to request handlers.

pub mod jwt;

pub use jwt::{Claims, JwtService};
