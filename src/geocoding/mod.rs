pub mod google;

pub use google::GoogleGeocoder;

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One candidate returned by a reverse-geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,

    #[serde(default)]
    pub place_id: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResult {
    pub fn new(formatted_address: impl Into<String>) -> Self {
        Self {
            formatted_address: formatted_address.into(),
            place_id: None,
            types: Vec::new(),
        }
    }
}

/// A service that turns a coordinate pair into candidate addresses.
///
/// One call is one request; implementations must not retry. An empty list
/// means the provider answered but knows no address for the point.
pub trait ReverseGeocoder {
    fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Vec<GeocodeResult>>;
}

impl<G: ReverseGeocoder + ?Sized> ReverseGeocoder for &G {
    fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Vec<GeocodeResult>> {
        (**self).reverse_geocode(latitude, longitude)
    }
}
