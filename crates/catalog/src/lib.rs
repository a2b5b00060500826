//! Typed data-access boundary for the book catalog service.
//!
//! Domain shapes and their validation live in [`schema`], the failure
//! taxonomy in [`error`], and the [`client::ApiClient`] contract with its
//! live (HTTP) and in-memory implementations in [`client`].

pub mod client;
pub mod error;
pub mod fixtures;
pub mod outcome;
pub mod schema;

pub use client::{live::LiveApiClient, memory::InMemoryApiClient, ApiClient, ApiClientArc};
pub use error::ApiError;
pub use outcome::{err, ok, safe, ApiResult};
