//! Station coercion from loosely-typed upstream records.

use serde_json::Value;

use crate::extract::extract_records;
use crate::fields::coerce_number;
use crate::types::Station;

const ID_FIELDS: [&str; 3] = ["id", "station_id", "code"];
const NAME_FIELDS: [&str; 2] = ["name", "station_name"];
const LAT_FIELDS: [&str; 2] = ["lat", "latitude"];
const LON_FIELDS: [&str; 2] = ["lon", "longitude"];

impl Station {
    /// Coerce one upstream record into a station. Records without a usable
    /// id or finite coordinates yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;

        let id = ID_FIELDS.iter().find_map(|key| id_string(record.get(*key)?))?;
        let lat = LAT_FIELDS.iter().find_map(|key| coerce_number(record.get(*key)?))?;
        let lon = LON_FIELDS.iter().find_map(|key| coerce_number(record.get(*key)?))?;
        let name = NAME_FIELDS
            .iter()
            .find_map(|key| record.get(*key)?.as_str())
            .map(str::to_string);

        Some(Self { id, name, lat, lon })
    }
}

/// Station ids arrive as strings or bare numbers.
fn id_string(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

/// Coerce a whole payload into stations, dropping records that fail rather
/// than failing the batch.
pub fn parse_stations(raw: &Value) -> Vec<Station> {
    extract_records(raw).iter().filter_map(Station::from_value).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_synonym_keys() {
        let stations = parse_stations(&json!([
            {"station_id": "KORD", "station_name": "O'Hare", "latitude": 41.97, "longitude": -87.9}
        ]));
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "KORD");
        assert_eq!(stations[0].name.as_deref(), Some("O'Hare"));
        assert_eq!(stations[0].lat, 41.97);
    }

    #[test]
    fn test_numeric_id_stringified() {
        let stations = parse_stations(&json!([{"code": 7421, "lat": 1.0, "lon": 2.0}]));
        assert_eq!(stations[0].id, "7421");
    }

    #[test]
    fn test_name_is_optional() {
        let stations = parse_stations(&json!([{"id": "X", "lat": 0.5, "lon": "3.25"}]));
        assert_eq!(stations[0].name, None);
        assert_eq!(stations[0].lon, 3.25);
    }

    #[test]
    fn test_invalid_records_dropped() {
        let stations = parse_stations(&json!([
            {"id": "", "lat": 1.0, "lon": 2.0},
            {"id": "ok", "lat": "north", "lon": 2.0},
            {"lat": 1.0, "lon": 2.0},
            {"id": "good", "lat": 1.0, "lon": 2.0}
        ]));
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "good");
    }
}
