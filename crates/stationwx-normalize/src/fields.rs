//! Field precedence tables and unit conversions.
//!
//! Each output column is driven by an ordered candidate list: the first
//! field present on the record wins, with an optional unit conversion
//! applied to the matched value. Later synonyms are ignored even when the
//! winning field fails numeric coercion.

use serde_json::{Map, Value};

/// Metres per second to knots.
pub const MPS_TO_KTS: f64 = 1.94384;
/// Inches of mercury to hectopascals.
pub const INHG_TO_HPA: f64 = 33.8639;

/// Temperature synonyms, already in °C.
pub const TEMP_C_FIELDS: [&str; 6] =
    ["temp_c", "temperature_c", "temperature", "temp", "air_temp_c", "tmpc"];

/// Wind synonyms already in knots.
pub const WIND_KTS_FIELDS: [&str; 4] = ["wind_kts", "sknt", "wspdk", "wspd"];

/// Wind synonyms in m/s, converted on match.
pub const WIND_MPS_FIELDS: [&str; 2] = ["wind_speed", "wind_mps"];

/// Pressure synonyms, already in hPa.
pub const PRESSURE_HPA_FIELDS: [&str; 7] = [
    "pressure_hpa",
    "pressure",
    "mslp",
    "pres",
    "pressure_mb",
    "sea_level_pressure_hpa",
    "slp",
];

/// Interpret a JSON value as a finite number. Numeric strings are accepted;
/// anything else yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// First candidate field present on the record, whether or not its value
/// coerces to a number.
pub fn first_present<'a>(record: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().find_map(|key| record.get(*key))
}
