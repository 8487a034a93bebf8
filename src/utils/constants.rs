/// Required column names
pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";
pub const ADDRESS_COLUMN: &str = "Address";

/// Coordinate bounds
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Placeholder addresses written when a lookup yields nothing usable
pub const NO_ADDRESS_FOUND: &str = "No address found";
pub const GEOCODING_ERROR: &str = "Error in geocoding";
pub const INVALID_COORDINATES: &str = "Invalid coordinates";

/// Delimiters
pub const COMMA: u8 = b',';
pub const SEMICOLON: u8 = b';';
pub const SAMPLE_DELIMITER: u8 = SEMICOLON;

/// Number of leading lines inspected by the already-cleaned check
pub const CLEAN_CHECK_LINES: usize = 3;

/// Provider defaults
pub const GOOGLE_GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_SETTINGS_FILE: &str = "coord-geocoder.toml";
pub const ENV_PREFIX: &str = "COORD_GEOCODER";

/// Rows listed in validity summaries
pub const SUMMARY_ROW_LIMIT: usize = 10;
