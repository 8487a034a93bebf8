use crate::utils::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Coerce a coordinate cell to a number.
///
/// Surrounding whitespace is ignored. Anything that does not parse to a
/// finite `f64` yields `None`, which callers treat as the invalid marker.
///
/// # Examples
/// ```
/// use coord_geocoder::utils::coerce_coordinate;
///
/// assert_eq!(coerce_coordinate(" 27.34 "), Some(27.34));
/// assert_eq!(coerce_coordinate("north"), None);
/// ```
pub fn coerce_coordinate(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Render a coerced coordinate back into a cell. Invalid markers become empty cells.
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn is_valid_latitude(latitude: f64) -> bool {
    (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
}

pub fn is_valid_longitude(longitude: f64) -> bool {
    (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}

/// Describe why a coordinate pair fails the range check, if it does
pub fn coordinate_problem(latitude: Option<f64>, longitude: Option<f64>) -> Option<String> {
    match (latitude, longitude) {
        (None, None) => Some("latitude and longitude are not numeric".to_string()),
        (None, Some(_)) => Some("latitude is not numeric".to_string()),
        (Some(_), None) => Some("longitude is not numeric".to_string()),
        (Some(lat), Some(lon)) => {
            if !is_valid_latitude(lat) {
                Some(format!(
                    "latitude {} is outside [{}, {}]",
                    lat, MIN_LATITUDE, MAX_LATITUDE
                ))
            } else if !is_valid_longitude(lon) {
                Some(format!(
                    "longitude {} is outside [{}, {}]",
                    lon, MIN_LONGITUDE, MAX_LONGITUDE
                ))
            } else {
                None
            }
        }
    }
}
