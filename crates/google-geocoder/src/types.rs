//! Coordinate, bounds and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A latitude/longitude pair.
///
/// Deserializes from either `{lat, lng}` or `{latitude, longitude}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Rectangular region given by its southwest and northeast corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

impl Bounds {
    pub fn new(southwest: impl Into<LatLng>, northeast: impl Into<LatLng>) -> Self {
        Self {
            southwest: southwest.into(),
            northeast: northeast.into(),
        }
    }
}

/// Body of a successful geocoding response.
///
/// The parsed document is kept exactly as the service sent it and serializes
/// back to the same JSON. The typed accessors read from it and skip whatever
/// does not fit the documented schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeocodeResponse {
    body: Value,
}

impl GeocodeResponse {
    pub(crate) fn new(body: Value) -> Self {
        Self { body }
    }

    /// `status` field, `OK` for every response the client returns
    pub fn status(&self) -> &str {
        self.body
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Number of entries in `results`, `0` when it is missing or not an array
    pub fn result_count(&self) -> usize {
        self.raw_results().len()
    }

    /// Entries of `results` that decode as [`GeocodeResult`]
    pub fn results(&self) -> Vec<GeocodeResult> {
        self.raw_results()
            .iter()
            .filter_map(|r| serde_json::from_value(r.clone()).ok())
            .collect()
    }

    pub fn plus_code(&self) -> Option<PlusCode> {
        decode(self.body.get("plus_code")?)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error_message")?.as_str()
    }

    /// `formatted_address` of the first result
    pub fn formatted_address(&self) -> Option<&str> {
        self.raw_results()
            .first()?
            .get("formatted_address")?
            .as_str()
    }

    /// `geometry.location` of the first result
    pub fn location(&self) -> Option<LatLng> {
        decode(self.raw_results().first()?.get("geometry")?.get("location")?)
    }

    fn raw_results(&self) -> &[Value] {
        self.body
            .get("results")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_components: Vec<AddressComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<PlusCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial_match: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    /// `ROOFTOP`, `RANGE_INTERPOLATED`, `GEOMETRIC_CENTER` or `APPROXIMATE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlusCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compound_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_code: Option<String>,
}
