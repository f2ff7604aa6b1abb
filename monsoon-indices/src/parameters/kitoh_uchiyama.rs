//! Kitoh & Uchiyama (2006) parameters

use serde::{Deserialize, Serialize};

/// Parameters for the Kitoh & Uchiyama (2006) rainy season
///
/// The smoothed pentad precipitation is rescaled per grid cell to the normalised
/// pentad precipitation index (NPPI) in [0, 1]; the rainy season is where the NPPI
/// is at least the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitohUchiyamaParameters {
    /// NPPI threshold, the golden ratio.
    ///
    /// Default: 0.618
    pub threshold: f64,
}

impl Default for KitohUchiyamaParameters {
    fn default() -> Self {
        Self { threshold: 0.618 }
    }
}
