//! Browser-facing HTTP service for the station-weather viewer.
//!
//! Exposes the upstream proxy endpoint plus normalized convenience
//! endpoints for stations and historical weather.

pub mod config;
pub mod routes;

pub use config::ServerConfig;
pub use routes::{router, AppState};
