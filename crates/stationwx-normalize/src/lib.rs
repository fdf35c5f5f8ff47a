//! Record normalization for heterogeneous station-weather payloads.
//!
//! Upstream feeds disagree on field names and units. This crate locates the
//! record array inside an arbitrary JSON payload, drops records that carry
//! no interpretable observation, and reconciles the survivors into one
//! canonical row shape (ISO timestamp, °C, knots, hPa). Malformed input is
//! handled by omission, never by failing the batch.

pub mod extract;
pub mod fields;
pub mod record;
pub mod station;
pub mod types;

pub use extract::extract_records;
pub use record::{normalize, normalize_at};
pub use station::parse_stations;
pub use types::{Station, WeatherRow};
