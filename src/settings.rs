use crate::error::{ProcessingError, Result};
use crate::processors::InvalidCoordinatePolicy;
use crate::readers::parse_delimiter;
use crate::utils::constants::{DEFAULT_SETTINGS_FILE, ENV_PREFIX, GOOGLE_GEOCODE_ENDPOINT};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use validator::Validate;

/// Runtime settings: built-in defaults, then an optional TOML file, then
/// `COORD_GEOCODER_*` environment variables. CLI flags are applied on top.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    /// Reverse-geocoding endpoint
    #[validate(length(min = 1))]
    pub endpoint: String,

    /// Per-request timeout; the HTTP client default applies when unset
    #[validate(range(min = 1, max = 600))]
    pub timeout_secs: Option<u64>,

    /// Preferred language for formatted addresses
    #[validate(length(min = 2, max = 16))]
    pub language: Option<String>,

    /// What to do with rows whose coordinates fail the range check
    pub invalid_coordinates: InvalidCoordinatePolicy,

    /// Delimiter for generated sample files
    #[validate(length(min = 1, max = 3))]
    pub sample_delimiter: String,
}

impl Settings {
    /// Load settings from `path`, or from the default settings file if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_SETTINGS_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("endpoint", GOOGLE_GEOCODE_ENDPOINT)?
            .set_default("invalid_coordinates", "geocode")?
            .set_default("sample_delimiter", ";")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    /// Validate field constraints and cross-field rules
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ProcessingError::Config(format!(
                "Geocoding endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        parse_delimiter(&self.sample_delimiter)?;

        Ok(())
    }

    pub fn sample_delimiter(&self) -> Result<u8> {
        parse_delimiter(&self.sample_delimiter)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: GOOGLE_GEOCODE_ENDPOINT.to_string(),
            timeout_secs: None,
            language: None,
            invalid_coordinates: InvalidCoordinatePolicy::Geocode,
            sample_delimiter: ";".to_string(),
        }
    }
}
