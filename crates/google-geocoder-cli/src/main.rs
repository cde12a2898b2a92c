//! geocode - Google geocoding from the command line
//!
//! Each positional argument is read as JSON when it parses as JSON and as a
//! plain string otherwise, so all call shapes are reachable:
//!
//! ```text
//! geocode 48.8566 2.3522
//! geocode '[48.8566, 2.3522]'
//! geocode '{"latitude": 48.8566, "longitude": 2.3522}'
//! geocode Paris '{"southwest": {"lat": 48, "lng": 2}, "northeast": {"lat": 49, "lng": 3}}'
//! geocode "10 Downing Street, London"
//! geocode 75001
//! ```
//!
//! A lone number is an address (a postal code), never half a coordinate.

mod config;
mod error;

use crate::config::Config;
use crate::error::{CliError, Result};
use clap::Parser;
use google_geocoder::{GeocodeParams, Geocoder, GeocoderError};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "geocode",
    version,
    about = "Geocode an address or reverse geocode coordinates"
)]
struct Args {
    /// Latitude and longitude, a [lat, lng] array, a {lat, lng} object,
    /// or an address optionally followed by a bounds object
    #[arg(required = true, allow_negative_numbers = true)]
    params: Vec<String>,

    /// API key (defaults to GOOGLE_MAPS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Language of the results (defaults to GEOCODER_LANGUAGE)
    #[arg(long)]
    language: Option<String>,

    /// Region bias as a ccTLD code (defaults to GEOCODER_REGION)
    #[arg(long)]
    region: Option<String>,

    /// Extra query parameter, may be repeated
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Endpoint to query (defaults to GEOCODER_BASE_URL or Google's endpoint)
    #[arg(long)]
    base_url: Option<String>,

    /// Print the request URL instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();

    init_logging(config.json_logs)?;

    let options = build_options(&args, &config)?;
    let api_key = args.api_key.clone().unwrap_or(config.api_key);
    let base_url = args.base_url.clone().unwrap_or(config.base_url);

    let geocoder = Geocoder::with_options(api_key, options).with_base_url(base_url);
    let values = parse_params(&args.params);

    if args.dry_run {
        if !geocoder.is_init() {
            return Err(GeocoderError::NotInitiated.into());
        }
        let params = GeocodeParams::from_values(&values)?;
        println!("{}", geocoder.request_url(&params)?);
        return Ok(());
    }

    info!(params = ?values, "Geocoding");

    match geocoder.from_values(&values).await {
        Ok(response) => {
            info!(results = response.result_count(), "Geocoding succeeded");
            print_json(&response, args.compact)
        }
        Err(err) => {
            error!(kind = %err.kind(), code = err.code(), error = %err, "Geocoding failed");
            if let Some(body) = err.server_body() {
                print_json(body, args.compact)?;
            }
            Err(err.into())
        }
    }
}

fn init_logging(json: bool) -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("google_geocoder=info".parse()?)
        .add_directive("google_geocoder_cli=info".parse()?);

    // stdout carries the geocoding result, logs go to stderr
    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

/// Environment options first, then `--language`/`--region`, then `-o` pairs
fn build_options(args: &Args, config: &Config) -> Result<Map<String, Value>> {
    let mut options = Map::new();

    let language = args.language.as_ref().or(config.language.as_ref());
    if let Some(language) = language {
        options.insert("language".to_string(), Value::String(language.clone()));
    }
    let region = args.region.as_ref().or(config.region.as_ref());
    if let Some(region) = region {
        options.insert("region".to_string(), Value::String(region.clone()));
    }

    for raw in &args.options {
        let (key, value) = parse_option(raw)?;
        options.insert(key, value);
    }

    Ok(options)
}

/// Positional arguments as call values; a single numeric argument stays a string
fn parse_params(raw: &[String]) -> Vec<Value> {
    match raw {
        [only] => match parse_param(only) {
            Value::Number(_) => vec![Value::String(only.clone())],
            value => vec![value],
        },
        _ => raw.iter().map(|p| parse_param(p)).collect(),
    }
}

/// JSON when the argument is valid JSON, a string otherwise
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_option(raw: &str) -> Result<(String, Value)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), parse_param(value))),
        _ => Err(CliError::Config(format!(
            "option must be KEY=VALUE, got {:?}",
            raw
        ))),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("48.8566"), json!(48.8566));
        assert_eq!(parse_param("[1, 2]"), json!([1, 2]));
        assert_eq!(parse_param(r#"{"lat": 1}"#), json!({"lat": 1}));
        assert_eq!(parse_param("Paris"), json!("Paris"));
        assert_eq!(
            parse_param("10 Downing Street, London"),
            json!("10 Downing Street, London")
        );
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(
            parse_option("components=country:FR").unwrap(),
            ("components".to_string(), json!("country:FR"))
        );
        assert_eq!(
            parse_option("filter=a=b").unwrap(),
            ("filter".to_string(), json!("a=b"))
        );
        assert!(parse_option("language").is_err());
        assert!(parse_option("=fr").is_err());
    }

    #[test]
    fn test_args_accept_negative_coordinates() {
        let args = Args::try_parse_from(["geocode", "-33.8688", "151.2093"]).unwrap();
        assert_eq!(args.params, ["-33.8688", "151.2093"]);
    }

    #[test]
    fn test_build_options_precedence() {
        let args = Args::try_parse_from([
            "geocode",
            "--language",
            "de",
            "-o",
            "region=fr",
            "Paris",
        ])
        .unwrap();
        let config = Config {
            api_key: String::new(),
            language: Some("en".to_string()),
            region: Some("us".to_string()),
            base_url: google_geocoder::DEFAULT_BASE_URL.to_string(),
            json_logs: false,
        };

        let options = build_options(&args, &config).unwrap();

        assert_eq!(options.get("language"), Some(&json!("de")));
        assert_eq!(options.get("region"), Some(&json!("fr")));
    }

    #[test]
    fn test_cli_values_normalize() {
        let values = parse_params(&["48.8566".to_string(), "2.3522".to_string()]);
        let params = GeocodeParams::from_values(&values).unwrap();
        assert_eq!(params, GeocodeParams::coordinates(48.8566, 2.3522));
    }

    #[test]
    fn test_lone_postal_code_is_an_address() {
        let values = parse_params(&["75001".to_string()]);
        assert_eq!(values, [json!("75001")]);

        let params = GeocodeParams::from_values(&values).unwrap();
        assert_eq!(params, GeocodeParams::address("75001"));
    }

    #[test]
    fn test_lone_json_argument_is_parsed() {
        let values = parse_params(&["[48.8566, 2.3522]".to_string()]);
        assert_eq!(values, [json!([48.8566, 2.3522])]);
    }
}
