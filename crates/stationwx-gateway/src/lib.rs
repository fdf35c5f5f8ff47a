//! Upstream gateway for the station-weather proxy.
//!
//! Resolves logical queries (station list, historical weather for one
//! station) against the upstream surface API, with bounded retries and a
//! short-TTL in-memory response cache to stay under the upstream rate limit.

pub mod cache;
pub mod client;
pub mod error;
pub mod query;
pub mod retry;

pub use cache::{Clock, ResponseCache, SystemClock};
pub use client::UpstreamGateway;
pub use error::UpstreamError;
pub use query::LogicalQuery;
pub use retry::RetryPolicy;
