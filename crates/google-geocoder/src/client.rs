use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::GeocoderError;
use crate::params::GeocodeParams;
use crate::query::QueryParams;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::GeocodeResponse;

/// Google geocoding endpoint
pub const DEFAULT_BASE_URL: &str = "https://maps.google.com/maps/api/geocode/json";

/// Google geocoding client.
///
/// Holds an API key and a set of extra query options (`language`, `region`,
/// `components`, ...) that are sent with every request. Each call issues
/// exactly one GET; there is no retry, caching or rate limiting.
pub struct Geocoder<T = ReqwestTransport> {
    api_key: String,
    options: Map<String, Value>,
    base_url: String,
    transport: T,
}

impl Geocoder {
    /// Create a client with no extra options
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_options(api_key, Map::new())
    }

    /// Create a client whose `options` are merged into every request
    pub fn with_options(api_key: impl Into<String>, options: Map<String, Value>) -> Self {
        Self::with_transport(api_key, options, ReqwestTransport::new())
    }
}

impl<T: Transport> Geocoder<T> {
    /// Create a client that sends its requests through `transport`
    pub fn with_transport(
        api_key: impl Into<String>,
        options: Map<String, Value>,
        transport: T,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
        }
    }

    /// Send requests to a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// True once the client has a non-empty API key
    pub fn is_init(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// (Reverse) geocode one of the accepted call shapes.
    ///
    /// ```no_run
    /// use google_geocoder::{Bounds, Geocoder, LatLng};
    ///
    /// # async fn example() -> google_geocoder::Result<()> {
    /// let geocoder = Geocoder::new("my-api-key");
    ///
    /// geocoder.from((48.8566, 2.3522)).await?;
    /// geocoder.from([48.8566, 2.3522]).await?;
    /// geocoder.from(LatLng::new(48.8566, 2.3522)).await?;
    /// geocoder.from("Paris").await?;
    /// geocoder
    ///     .from(("Paris", Bounds::new((48.0, 2.0), (49.0, 3.0))))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn from(&self, params: impl Into<GeocodeParams>) -> crate::Result<GeocodeResponse> {
        self.ensure_init()?;
        let url = self.build_url(&params.into());
        self.execute(&url).await
    }

    /// Same as [`from`](Self::from) for untyped arguments.
    ///
    /// See [`GeocodeParams::from_values`] for how the arguments are read.
    pub async fn from_values(&self, values: &[Value]) -> crate::Result<GeocodeResponse> {
        self.ensure_init()?;
        let params = GeocodeParams::from_values(values)?;
        let url = self.build_url(&params);
        self.execute(&url).await
    }

    /// The URL a call with `params` would request, without sending it
    pub fn request_url(&self, params: &GeocodeParams) -> crate::Result<String> {
        self.ensure_init()?;
        Ok(self.build_url(params))
    }

    fn ensure_init(&self) -> crate::Result<()> {
        if self.is_init() {
            Ok(())
        } else {
            Err(GeocoderError::NotInitiated)
        }
    }

    fn build_url(&self, params: &GeocodeParams) -> String {
        let query = QueryParams::merge(&self.api_key, &self.options, params.to_canonical());
        format!("{}?{}", self.base_url, query.to_query_string())
    }

    async fn execute(&self, url: &str) -> crate::Result<GeocodeResponse> {
        debug!(url = %redact_key(url), "Sending geocoding request");

        let response = self
            .transport
            .get(url)
            .await
            .map_err(GeocoderError::Fetching)?;

        if !response.is_success() {
            warn!(status = response.status, "Geocoding endpoint returned HTTP error status");
        }

        let body: Value = match serde_json::from_str(&response.body) {
            Ok(body) => body,
            Err(source) => return Err(GeocoderError::Parsing { response, source }),
        };

        let status = body.get("status").and_then(Value::as_str);
        if status != Some("OK") {
            let status = status.unwrap_or("missing");
            warn!(status, "Geocoding request rejected by server");
            return Err(GeocoderError::Server(body));
        }

        let data = GeocodeResponse::new(body);

        debug!(results = data.result_count(), "Geocoded");

        Ok(data)
    }
}

/// Replace the value of the `key` parameter so URLs can be logged
fn redact_key(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("key=") {
                "key=REDACTED"
            } else {
                pair
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}
