use crate::utils::coordinates::coordinate_problem;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A latitude/longitude pair after numeric coercion.
///
/// `None` is the invalid marker for a cell that did not parse. Range checks
/// are advisory: out-of-range pairs are still carried through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both values present and within bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some() && self.validate().is_ok()
    }

    /// Both values parsed, regardless of range
    pub fn is_numeric(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Numeric pair, if both cells parsed
    pub fn pair(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Human-readable reason this pair fails validation
    pub fn problem(&self) -> Option<String> {
        coordinate_problem(self.latitude, self.longitude)
    }
}
