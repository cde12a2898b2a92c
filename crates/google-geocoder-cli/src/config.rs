use std::env;

use google_geocoder::DEFAULT_BASE_URL;

/// CLI configuration parsed from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub language: Option<String>,
    pub region: Option<String>,
    pub base_url: String,
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = var("GOOGLE_MAPS_API_KEY").unwrap_or_default();

        let language = var("GEOCODER_LANGUAGE").filter(|s| !s.is_empty());
        let region = var("GEOCODER_REGION").filter(|s| !s.is_empty());

        let base_url = var("GEOCODER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Use JSON format for Cloud Logging when LOG_FORMAT=json
        let json_logs = var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

        Self {
            api_key,
            language,
            region,
            base_url,
            json_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_key, "");
        assert_eq!(config.language, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_reads_variables() {
        let config = config_from(&[
            ("GOOGLE_MAPS_API_KEY", "abc"),
            ("GEOCODER_LANGUAGE", "fr"),
            ("GEOCODER_REGION", ""),
            ("GEOCODER_BASE_URL", "http://localhost:9000/json"),
            ("LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.region, None);
        assert_eq!(config.base_url, "http://localhost:9000/json");
        assert!(config.json_logs);
    }
}
