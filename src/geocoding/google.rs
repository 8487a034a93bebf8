use crate::error::{ProcessingError, Result};
use crate::geocoding::{GeocodeResult, ReverseGeocoder};
use crate::settings::Settings;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Body of a Geocoding API JSON response
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    status: String,

    #[serde(default)]
    results: Vec<GeocodeResult>,

    #[serde(default)]
    error_message: Option<String>,
}

/// Google Maps Geocoding API client using blocking HTTP
pub struct GoogleGeocoder {
    client: Client,
    endpoint: String,
    api_key: String,
    language: Option<String>,
}

impl GoogleGeocoder {
    pub fn new(api_key: &str, settings: &Settings) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ProcessingError::Config(
                "An API key is required for the geocoding provider".to_string(),
            ));
        }

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint.clone(),
            api_key: api_key.to_string(),
            language: settings.language.clone(),
        })
    }

    fn query(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("latlng", format!("{},{}", latitude, longitude)),
            ("key", self.api_key.clone()),
        ];
        if let Some(ref language) = self.language {
            query.push(("language", language.clone()));
        }
        query
    }
}

impl ReverseGeocoder for GoogleGeocoder {
    fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Vec<GeocodeResult>> {
        debug!("Requesting reverse geocode for {}, {}", latitude, longitude);

        // Strip the URL from transport errors so the key never reaches the logs
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.query(latitude, longitude))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProcessingError::Http(e.without_url()))?;

        let body = response
            .text()
            .map_err(|e| ProcessingError::Http(e.without_url()))?;
        let decoded: GeocodeResponse = serde_json::from_str(&body)?;

        interpret_response(decoded)
    }
}

/// Map a provider status to results: `OK` yields the results, `ZERO_RESULTS`
/// an empty list, anything else an error
pub(crate) fn interpret_response(response: GeocodeResponse) -> Result<Vec<GeocodeResult>> {
    match response.status.as_str() {
        STATUS_OK => Ok(response.results),
        STATUS_ZERO_RESULTS => Ok(Vec::new()),
        status => Err(ProcessingError::Geocode(match response.error_message {
            Some(message) => format!("{} ({})", status, message),
            None => status.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_ok_response_keeps_result_order() {
        let response = decode(
            r#"{
                "status": "OK",
                "results": [
                    {"formatted_address": "King Fahd Rd, Tabuk 47913, Saudi Arabia", "place_id": "abc", "types": ["route"]},
                    {"formatted_address": "Tabuk, Saudi Arabia"}
                ]
            }"#,
        );

        let results = interpret_response(response).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].formatted_address,
            "King Fahd Rd, Tabuk 47913, Saudi Arabia"
        );
        assert_eq!(results[0].place_id.as_deref(), Some("abc"));
        assert!(results[1].types.is_empty());
    }

    #[test]
    fn test_zero_results_is_empty_not_error() {
        let response = decode(r#"{"status": "ZERO_RESULTS", "results": []}"#);
        assert!(interpret_response(response).unwrap().is_empty());
    }

    #[test]
    fn test_provider_status_is_error() {
        let response = decode(
            r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "results": []}"#,
        );
        let err = interpret_response(response).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Geocoding error: REQUEST_DENIED (The provided API key is invalid.)"
        );
    }

    #[test]
    fn test_missing_key_rejected() {
        let settings = Settings::default();
        assert!(matches!(
            GoogleGeocoder::new("  ", &settings),
            Err(ProcessingError::Config(_))
        ));
    }

    #[test]
    fn test_query_parameters() {
        let mut settings = Settings::default();
        settings.language = Some("en".to_string());
        let geocoder = GoogleGeocoder::new("test-key", &settings).unwrap();

        let query = geocoder.query(27.34, 35.7);
        assert_eq!(query[0], ("latlng", "27.34,35.7".to_string()));
        assert_eq!(query[1], ("key", "test-key".to_string()));
        assert_eq!(query[2], ("language", "en".to_string()));
    }
}
