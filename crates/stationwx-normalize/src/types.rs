//! Canonical output shapes.

use serde::{Deserialize, Serialize};

/// One normalized weather observation.
///
/// `None` means "no interpretable value among the known fields", not an
/// upstream error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRow {
    /// ISO-8601 timestamp.
    pub time: String,
    /// Temperature in °C.
    pub temp_c: Option<f64>,
    /// Wind speed in knots, rounded to 2 decimal places.
    pub wind_kts: Option<f64>,
    /// Pressure in hPa, rounded to 1 decimal place.
    pub pressure_hpa: Option<f64>,
}

/// A surface station, coerced from loosely-typed upstream fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}
