//! Error types for the geocode CLI

use std::fmt;

use google_geocoder::GeocoderError;

#[derive(Debug)]
pub enum CliError {
    Geocoder(GeocoderError),
    Config(String),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Geocoder(err) => write!(f, "{} [{}]", err, err.kind()),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Geocoder(err) => Some(err),
            CliError::Json(err) => Some(err),
            CliError::Config(_) => None,
        }
    }
}

impl From<GeocoderError> for CliError {
    fn from(err: GeocoderError) -> Self {
        CliError::Geocoder(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

impl From<tracing_subscriber::filter::ParseError> for CliError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        CliError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocoder_error_display_includes_kind() {
        let err = CliError::from(GeocoderError::NotInitiated);
        assert!(format!("{}", err).ends_with("[NOT_INITIATED]"));
    }

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("option must be KEY=VALUE".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: option must be KEY=VALUE"
        );
    }

    #[test]
    fn test_error_is_debug() {
        let err = CliError::Config("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
    }
}
