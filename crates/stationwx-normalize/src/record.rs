//! Validation and reconciliation of individual weather records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::extract::extract_records;
use crate::fields::{
    coerce_number, first_present, INHG_TO_HPA, MPS_TO_KTS, PRESSURE_HPA_FIELDS, TEMP_C_FIELDS,
    WIND_KTS_FIELDS, WIND_MPS_FIELDS,
};
use crate::types::WeatherRow;

/// Normalize an arbitrary upstream payload into canonical weather rows,
/// preserving input order. Records without any interpretable observation
/// are silently dropped.
pub fn normalize(raw: &Value) -> Vec<WeatherRow> {
    normalize_at(raw, Utc::now())
}

/// Variant with an explicit timestamp, used for records that carry no time
/// field of their own.
pub fn normalize_at(raw: &Value, now: DateTime<Utc>) -> Vec<WeatherRow> {
    extract_records(raw)
        .iter()
        .filter_map(Value::as_object)
        .filter(|record| has_observation(record))
        .map(|record| WeatherRow {
            time: reconcile_time(record, now),
            temp_c: reconcile_temp(record),
            wind_kts: reconcile_wind(record).map(|v| round_to(v, 2)),
            pressure_hpa: reconcile_pressure(record).map(|v| round_to(v, 1)),
        })
        .collect()
}

/// Validation predicate: the record carries at least one temperature, wind
/// or pressure field. This checks field presence, not numeric coercion, so
/// a record can pass here and still normalize to an all-null row.
fn has_observation(record: &Map<String, Value>) -> bool {
    let has_temp = TEMP_C_FIELDS.iter().any(|key| record.contains_key(*key));
    let has_wind = WIND_KTS_FIELDS
        .iter()
        .chain(WIND_MPS_FIELDS.iter())
        .any(|key| record.contains_key(*key))
        || (record.contains_key("wind_x") && record.contains_key("wind_y"));
    let has_pressure = PRESSURE_HPA_FIELDS.iter().any(|key| record.contains_key(*key))
        || record.contains_key("alti");

    has_temp || has_wind || has_pressure
}

/// `timestamp` wins over `time`; null counts as absent. Missing or
/// unparseable values fall back to `now`. Numeric values above 10 000 are
/// epoch milliseconds.
fn reconcile_time(record: &Map<String, Value>, now: DateTime<Utc>) -> String {
    let value = ["timestamp", "time"]
        .iter()
        .find_map(|key| record.get(*key).filter(|v| !v.is_null()));
    let Some(value) = value else {
        return to_iso(now);
    };

    if let Some(n) = coerce_number(value) {
        if n > 10_000.0 {
            if let Some(parsed) = DateTime::from_timestamp_millis(n as i64) {
                return to_iso(parsed);
            }
        }
    }

    if let Some(s) = value.as_str() {
        if let Some(parsed) = parse_date_string(s) {
            return to_iso(parsed);
        }
    }

    to_iso(now)
}

fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(parsed.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

fn to_iso(datetime: DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn reconcile_temp(record: &Map<String, Value>) -> Option<f64> {
    first_present(record, &TEMP_C_FIELDS).and_then(coerce_number)
}

/// Knots-valued synonyms win outright; m/s synonyms and the `wind_x`/
/// `wind_y` vector pair (Euclidean magnitude) are converted on match.
fn reconcile_wind(record: &Map<String, Value>) -> Option<f64> {
    if let Some(value) = first_present(record, &WIND_KTS_FIELDS) {
        return coerce_number(value);
    }
    if let Some(value) = first_present(record, &WIND_MPS_FIELDS) {
        return coerce_number(value).map(|mps| mps * MPS_TO_KTS);
    }
    match (record.get("wind_x"), record.get("wind_y")) {
        (Some(x), Some(y)) => {
            let x = coerce_number(x)?;
            let y = coerce_number(y)?;
            Some(x.hypot(y) * MPS_TO_KTS)
        }
        _ => None,
    }
}

/// hPa synonyms win outright; `alti` (inches of mercury) is converted.
fn reconcile_pressure(record: &Map<String, Value>) -> Option<f64> {
    if let Some(value) = first_present(record, &PRESSURE_HPA_FIELDS) {
        return coerce_number(value);
    }
    record.get("alti").and_then(coerce_number).map(|inhg| inhg * INHG_TO_HPA)
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
