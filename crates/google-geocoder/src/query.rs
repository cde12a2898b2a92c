//! Query-string construction for geocoding requests

use serde_json::{Map, Number, Value};

use crate::params::CanonicalQuery;
use crate::types::Bounds;

/// A single query parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Json(Value),
    Bounds(Bounds),
}

impl QueryValue {
    /// Values that are left out of the query string entirely: empty strings,
    /// zero, `null` and `false`
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Json(value) => is_falsy(value),
            Self::Bounds(_) => false,
        }
    }

    /// Percent-encoded form of the value
    pub fn encode(&self) -> String {
        match self {
            Self::Text(s) => urlencoding::encode(s).into_owned(),
            Self::Json(value) => urlencoding::encode(&json_to_text(value)).into_owned(),
            Self::Bounds(bounds) => encode_bounds(bounds),
        }
    }

    fn from_option(key: &str, value: &Value) -> Self {
        if key == "bounds" && value.is_object() {
            if let Ok(bounds) = serde_json::from_value::<Bounds>(value.clone()) {
                return Self::Bounds(bounds);
            }
        }
        Self::Json(value.clone())
    }
}

/// Ordered set of query parameters.
///
/// Inserting an existing key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{key: api_key} ∪ options ∪ canonical`, later entries winning
    pub fn merge(api_key: &str, options: &Map<String, Value>, canonical: CanonicalQuery) -> Self {
        let mut query = Self::new();
        query.insert("key", QueryValue::Text(api_key.to_string()));
        for (key, value) in options {
            query.insert(key.as_str(), QueryValue::from_option(key, value));
        }
        canonical.apply_to(&mut query);
        query
    }

    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Encode as `k1=v1&k2=v2`, skipping falsy values
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .filter(|(_, value)| !value.is_falsy())
            .map(|(key, value)| format!("{}={}", key, value.encode()))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// `sw.lat,sw.lng|ne.lat,ne.lng`, each number percent-encoded
pub fn encode_bounds(bounds: &Bounds) -> String {
    let Bounds {
        southwest,
        northeast,
    } = bounds;
    format!(
        "{},{}|{},{}",
        urlencoding::encode(&southwest.lat.to_string()),
        urlencoding::encode(&southwest.lng.to_string()),
        urlencoding::encode(&northeast.lat.to_string()),
        urlencoding::encode(&northeast.lng.to_string()),
    )
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Array(items) => items
            .iter()
            .map(json_to_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("options must be an object"),
        }
    }

    #[test]
    fn test_encode_bounds() {
        let bounds = Bounds::new((1.0, 2.0), (3.0, 4.0));
        assert_eq!(encode_bounds(&bounds), "1,2|3,4");

        let bounds = Bounds::new((-33.9, 151.1), (-33.8, 151.3));
        assert_eq!(encode_bounds(&bounds), "-33.9,151.1|-33.8,151.3");
    }

    #[test]
    fn test_latlng_is_percent_encoded() {
        let query = QueryParams::merge(
            "secret",
            &Map::new(),
            CanonicalQuery::LatLng("48.8566,2.3522".to_string()),
        );
        assert_eq!(
            query.to_query_string(),
            "key=secret&latlng=48.8566%2C2.3522"
        );
    }

    #[test]
    fn test_falsy_values_are_omitted() {
        let opts = options(json!({
            "language": "",
            "region": null,
            "result_type": false,
            "zoom": 0,
            "components": "country:FR"
        }));
        let query = QueryParams::merge(
            "secret",
            &opts,
            CanonicalQuery::Address {
                address: "Paris".to_string(),
                bounds: None,
            },
        );
        let qs = query.to_query_string();

        assert_eq!(qs, "key=secret&components=country%3AFR&address=Paris");
        assert!(!qs.contains("language"));
    }

    #[test]
    fn test_canonical_keys_override_options() {
        let opts = options(json!({"address": "Lyon", "latlng": "1,1"}));
        let query = QueryParams::merge(
            "secret",
            &opts,
            CanonicalQuery::Address {
                address: "Paris".to_string(),
                bounds: None,
            },
        );

        assert_eq!(
            query.get("address"),
            Some(&QueryValue::Text("Paris".to_string()))
        );
        // latlng came from options; it is left alone
        assert_eq!(query.keys().collect::<Vec<_>>(), ["key", "address", "latlng"]);
    }

    #[test]
    fn test_address_with_bounds() {
        let query = QueryParams::merge(
            "secret",
            &Map::new(),
            CanonicalQuery::Address {
                address: "Paris".to_string(),
                bounds: Some(Bounds::new((48.0, 2.0), (49.0, 3.0))),
            },
        );
        assert_eq!(
            query.to_query_string(),
            "key=secret&address=Paris&bounds=48,2|49,3"
        );
    }

    #[test]
    fn test_bounds_option_uses_bounds_encoding() {
        let opts = options(json!({
            "bounds": {"southwest": {"lat": 1, "lng": 2}, "northeast": {"lat": 3, "lng": 4}}
        }));
        let query = QueryParams::merge("k", &opts, CanonicalQuery::LatLng("0,0".to_string()));
        assert!(query.to_query_string().contains("bounds=1,2|3,4"));
    }

    #[test]
    fn test_option_value_rendering() {
        let opts = options(json!({
            "result_type": ["street_address", "route"],
            "retries": 1.0,
            "enabled": true
        }));
        let query = QueryParams::merge("k", &opts, CanonicalQuery::LatLng("1,2".to_string()));
        let qs = query.to_query_string();

        assert!(qs.contains("result_type=street_address%2Croute"));
        assert!(qs.contains("retries=1&"));
        assert!(qs.contains("enabled=true"));
    }

    #[test]
    fn test_address_is_percent_encoded() {
        let query = QueryParams::merge(
            "k",
            &Map::new(),
            CanonicalQuery::Address {
                address: "1600 Amphitheatre Pkwy & Co".to_string(),
                bounds: None,
            },
        );
        assert!(query
            .to_query_string()
            .ends_with("address=1600%20Amphitheatre%20Pkwy%20%26%20Co"));
    }
}
