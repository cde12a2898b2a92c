//! Call shapes accepted by [`Geocoder::from`](crate::Geocoder::from) and their
//! canonical query form

use serde_json::{Map, Value};

use crate::error::{GeocoderError, Result};
use crate::query::{QueryParams, QueryValue};
use crate::types::{Bounds, LatLng};

/// What to geocode.
///
/// The first three variants request reverse geocoding of a coordinate, the
/// last two forward geocoding of an address. They differ only in how the
/// caller holds the data; all three coordinate forms produce the same query.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeParams {
    /// `(latitude, longitude)` as two numbers
    Coordinates(f64, f64),
    /// `[latitude, longitude]`
    CoordinatePair([f64; 2]),
    /// `{lat, lng}` or `{latitude, longitude}`
    LatLngObject(LatLng),
    /// Address search restricted to a region
    AddressWithBounds { address: String, bounds: Bounds },
    /// Free-text address
    Address(String),
}

impl GeocodeParams {
    pub fn coordinates(lat: f64, lng: f64) -> Self {
        Self::Coordinates(lat, lng)
    }

    pub fn pair(pair: [f64; 2]) -> Self {
        Self::CoordinatePair(pair)
    }

    pub fn lat_lng(location: LatLng) -> Self {
        Self::LatLngObject(location)
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self::Address(address.into())
    }

    pub fn address_with_bounds(address: impl Into<String>, bounds: Bounds) -> Self {
        Self::AddressWithBounds {
            address: address.into(),
            bounds,
        }
    }

    /// Resolve untyped call arguments into one of the five shapes.
    ///
    /// Rules are tried in order and the first match wins:
    /// two numbers (or numeric strings), an array of at least two numbers,
    /// an object with `lat|latitude` and `lng|longitude`, a string followed
    /// by a bounds object, a lone string. A coordinate of `0` counts as
    /// present.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        if let (Some(lat), Some(lng)) = (
            values.first().and_then(as_coordinate),
            values.get(1).and_then(as_coordinate),
        ) {
            return Ok(Self::Coordinates(lat, lng));
        }

        match values.first() {
            Some(Value::Array(items)) if items.len() >= 2 => {
                if let (Some(lat), Some(lng)) = (as_coordinate(&items[0]), as_coordinate(&items[1]))
                {
                    return Ok(Self::CoordinatePair([lat, lng]));
                }
            }
            Some(Value::Object(fields)) => {
                if let Some(location) = lat_lng_from_fields(fields) {
                    return Ok(Self::LatLngObject(location));
                }
            }
            Some(Value::String(address)) => {
                return match values.get(1) {
                    Some(bounds @ Value::Object(_)) => {
                        let bounds = serde_json::from_value::<Bounds>(bounds.clone())
                            .map_err(|_| invalid_parameters(values))?;
                        Ok(Self::address_with_bounds(address.as_str(), bounds))
                    }
                    _ => Ok(Self::address(address.as_str())),
                };
            }
            _ => {}
        }

        Err(invalid_parameters(values))
    }

    /// Canonical query for this call shape
    pub fn to_canonical(&self) -> CanonicalQuery {
        match self {
            Self::Coordinates(lat, lng) | Self::CoordinatePair([lat, lng]) => {
                CanonicalQuery::LatLng(format_lat_lng(*lat, *lng))
            }
            Self::LatLngObject(location) => {
                CanonicalQuery::LatLng(format_lat_lng(location.lat, location.lng))
            }
            Self::AddressWithBounds { address, bounds } => CanonicalQuery::Address {
                address: address.clone(),
                bounds: Some(*bounds),
            },
            Self::Address(address) => CanonicalQuery::Address {
                address: address.clone(),
                bounds: None,
            },
        }
    }
}

impl From<(f64, f64)> for GeocodeParams {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::Coordinates(lat, lng)
    }
}

impl From<[f64; 2]> for GeocodeParams {
    fn from(pair: [f64; 2]) -> Self {
        Self::CoordinatePair(pair)
    }
}

impl From<LatLng> for GeocodeParams {
    fn from(location: LatLng) -> Self {
        Self::LatLngObject(location)
    }
}

impl From<&str> for GeocodeParams {
    fn from(address: &str) -> Self {
        Self::address(address)
    }
}

impl From<String> for GeocodeParams {
    fn from(address: String) -> Self {
        Self::Address(address)
    }
}

impl From<(&str, Bounds)> for GeocodeParams {
    fn from((address, bounds): (&str, Bounds)) -> Self {
        Self::address_with_bounds(address, bounds)
    }
}

impl From<(String, Bounds)> for GeocodeParams {
    fn from((address, bounds): (String, Bounds)) -> Self {
        Self::address_with_bounds(address, bounds)
    }
}

/// Normalized request parameters: a coordinate string or an address
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalQuery {
    /// `"lat,lng"`
    LatLng(String),
    Address {
        address: String,
        bounds: Option<Bounds>,
    },
}

impl CanonicalQuery {
    /// Write the canonical keys into `query`, replacing any existing values
    pub(crate) fn apply_to(self, query: &mut QueryParams) {
        match self {
            Self::LatLng(latlng) => query.insert("latlng", QueryValue::Text(latlng)),
            Self::Address { address, bounds } => {
                query.insert("address", QueryValue::Text(address));
                if let Some(bounds) = bounds {
                    query.insert("bounds", QueryValue::Bounds(bounds));
                }
            }
        }
    }
}

fn format_lat_lng(lat: f64, lng: f64) -> String {
    format!("{lat},{lng}")
}

fn as_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

fn lat_lng_from_fields(fields: &Map<String, Value>) -> Option<LatLng> {
    let field = |short: &str, long: &str| {
        fields
            .get(short)
            .filter(|v| !v.is_null())
            .or_else(|| fields.get(long))
            .and_then(as_coordinate)
    };

    Some(LatLng::new(
        field("lat", "latitude")?,
        field("lng", "longitude")?,
    ))
}

fn invalid_parameters(values: &[Value]) -> GeocoderError {
    let rendered =
        serde_json::to_string_pretty(values).unwrap_or_else(|_| format!("{:?}", values));
    GeocoderError::InvalidParameters(rendered)
}
