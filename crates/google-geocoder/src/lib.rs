//! Google Geocoding Client
//!
//! A Rust client for the [Google Geocoding API](https://developers.google.com/maps/documentation/geocoding)
//! that turns coordinates into addresses and addresses into coordinates.
//!
//! # Example
//!
//! ```no_run
//! use google_geocoder::{ErrorKind, Geocoder};
//!
//! # async fn example() -> Result<(), google_geocoder::GeocoderError> {
//! let geocoder = Geocoder::new("my-api-key");
//!
//! match geocoder.from("1600 Amphitheatre Parkway, Mountain View").await {
//!     Ok(response) => println!("{:?}", response.location()),
//!     Err(e) if e.kind() == ErrorKind::Server => println!("{:?}", e.server_status()),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Each call sends a single request: there is no retry, caching or rate
//! limiting. Failures are reported as a [`GeocoderError`] whose
//! [`ErrorKind`] names the stage that failed.

mod client;
mod error;
mod params;
mod query;
mod transport;
mod types;

pub use client::{Geocoder, DEFAULT_BASE_URL};
pub use error::{ErrorKind, GeocoderError, Result};
pub use params::{CanonicalQuery, GeocodeParams};
pub use query::{encode_bounds, QueryParams, QueryValue};
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
pub use types::{
    AddressComponent, Bounds, GeocodeResponse, GeocodeResult, Geometry, LatLng, PlusCode,
};
