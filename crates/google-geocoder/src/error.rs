//! Error types for the geocoding client

use std::fmt;

use serde_json::Value;

use crate::transport::{HttpResponse, TransportError};

/// Stage at which a geocoding call failed.
///
/// The discriminants are stable and match the numeric codes exposed by
/// [`GeocoderError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// The client has no API key.
    NotInitiated = 0,
    /// The call arguments match none of the accepted shapes.
    InvalidParameters = 1,
    /// The request could not be sent or its body could not be read.
    Fetching = 2,
    /// The response body is not a JSON geocoding document.
    Parsing = 3,
    /// The service answered with a status other than `OK`.
    Server = 4,
}

impl ErrorKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotInitiated => "NOT_INITIATED",
            Self::InvalidParameters => "INVALID_PARAMETERS",
            Self::Fetching => "FETCHING",
            Self::Parsing => "PARSING",
            Self::Server => "SERVER",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from the geocoding client
#[derive(Debug)]
pub enum GeocoderError {
    /// Empty API key
    NotInitiated,
    /// Arguments that match no call shape, serialized for diagnostics
    InvalidParameters(String),
    /// Transport failure, with the transport's own error as origin
    Fetching(TransportError),
    /// Body that could not be decoded, with the raw response as origin
    Parsing {
        response: HttpResponse,
        source: serde_json::Error,
    },
    /// Non-`OK` status, with the parsed body as origin
    Server(Value),
}

impl GeocoderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInitiated => ErrorKind::NotInitiated,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::Fetching(_) => ErrorKind::Fetching,
            Self::Parsing { .. } => ErrorKind::Parsing,
            Self::Server(_) => ErrorKind::Server,
        }
    }

    /// Numeric code of the error kind (`0` to `4`)
    pub fn code(&self) -> u8 {
        self.kind().code()
    }

    /// The transport error behind a `Fetching` failure
    pub fn transport_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Fetching(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// The unparsed response behind a `Parsing` failure
    pub fn raw_response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Parsing { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The parsed body behind a `Server` failure
    pub fn server_body(&self) -> Option<&Value> {
        match self {
            Self::Server(body) => Some(body),
            _ => None,
        }
    }

    /// The `status` reported by the service, for `Server` failures
    pub fn server_status(&self) -> Option<&str> {
        self.server_body()?.get("status")?.as_str()
    }
}

impl fmt::Display for GeocoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitiated => write!(
                f,
                "Geocoder isn't initialized: construct it with your application's API key"
            ),
            Self::InvalidParameters(params) => write!(f, "Invalid parameters: {params}"),
            Self::Fetching(e) => write!(f, "Error while fetching: {e}"),
            Self::Parsing { response, source } => write!(
                f,
                "Error while parsing response body (HTTP {}): {source}",
                response.status
            ),
            Self::Server(body) => {
                let status = body
                    .get("status")
                    .and_then(Value::as_str)
                    .unwrap_or("missing status");
                write!(f, "Server error while geocoding: {status}")?;
                if let Some(msg) = body.get("error_message").and_then(Value::as_str) {
                    write!(f, " ({msg})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for GeocoderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetching(e) => Some(e.as_ref()),
            Self::Parsing { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeocoderError>;
