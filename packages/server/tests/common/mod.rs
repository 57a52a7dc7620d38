pub mod client;
pub mod fixtures;
pub mod harness;

pub use client::{ApiResponse, RestClient};
pub use harness::TestHarness;
