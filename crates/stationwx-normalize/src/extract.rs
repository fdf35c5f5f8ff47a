//! Locating the record array inside an arbitrary upstream payload.

use serde_json::Value;

/// Object keys checked, in order, before falling back to the first
/// array-valued property.
const CANDIDATE_KEYS: [&str; 5] = ["data", "results", "items", "records", "points"];

/// Find the array of records in `raw`.
///
/// The payload may be the array itself, an object nesting it under one of
/// several known keys, or an object with the array under some other key.
/// When no array exists anywhere, the result is empty.
pub fn extract_records(raw: &Value) -> &[Value] {
    if let Some(records) = raw.as_array() {
        return records;
    }
    let Some(object) = raw.as_object() else {
        return &[];
    };
    for key in CANDIDATE_KEYS {
        if let Some(records) = object.get(key).and_then(Value::as_array) {
            return records;
        }
    }
    object
        .values()
        .find_map(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_array() {
        let raw = json!([{"temp_c": 1}]);
        assert_eq!(extract_records(&raw).len(), 1);
    }

    #[test]
    fn test_candidate_keys_checked_in_order() {
        let raw = json!({"results": [1, 2], "data": [1]});
        assert_eq!(extract_records(&raw), &[json!(1)]);
    }

    #[test]
    fn test_falls_back_to_first_array_property() {
        let raw = json!({"meta": {"n": 3}, "observations": [1, 2, 3]});
        assert_eq!(extract_records(&raw).len(), 3);
    }

    #[test]
    fn test_no_array_anywhere_is_empty() {
        assert!(extract_records(&json!({"status": "ok"})).is_empty());
        assert!(extract_records(&json!("text")).is_empty());
        assert!(extract_records(&json!(null)).is_empty());
    }
}
