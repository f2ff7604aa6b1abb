//! Wang & LinHo (2002) parameters

use serde::{Deserialize, Serialize};

/// Parameters for the Wang & LinHo (2002) rainy season
///
/// The rainy season is where smoothed pentad precipitation exceeds the local
/// dry-season reference (the January mean in the northern hemisphere, July in the
/// southern) by at least the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WangLinHoParameters {
    /// Relative rainfall threshold (mm/day).
    ///
    /// Default: 5.0 mm/day
    pub threshold: f64,
}

impl Default for WangLinHoParameters {
    fn default() -> Self {
        Self { threshold: 5.0 }
    }
}
