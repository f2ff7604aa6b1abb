//! Wang et al. (2004) South China Sea onset parameters

use monsoon_core::levels::LevelSelection;
use monsoon_core::region::RegionBox;
use serde::{Deserialize, Serialize};

/// Parameters for the Wang et al. (2004) South China Sea monsoon onset
///
/// Onset is the first pentad, from `first_pentad` on, at which the regional mean
/// 850 hPa zonal wind turns westerly and stays predominantly westerly:
///
/// 1. $\bar{u}_i > 0$
/// 2. $\sum_{k=i}^{i+3} \bar{u}_k > 1$ m/s
/// 3. at least two of $\bar{u}_i, \dots, \bar{u}_{i+3}$ are positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wang2004Parameters {
    /// Default: 5-15°N, 110-120°E
    pub region: RegionBox,

    /// First pentad number considered.
    ///
    /// Default: 24
    pub first_pentad: f64,

    /// Pentads in the persistence window, counting the onset pentad.
    ///
    /// Default: 4
    pub window: usize,

    /// Required sum of the mean wind over the window (m/s).
    ///
    /// Default: 1.0 m/s
    pub min_window_sum: f64,

    /// Required number of westerly pentads in the window.
    ///
    /// Default: 2
    pub min_westerly: usize,

    /// Default: 850 hPa, level coordinate in Pa
    pub level: LevelSelection,
}

impl Default for Wang2004Parameters {
    fn default() -> Self {
        Self {
            region: RegionBox::new([5.0, 15.0], [110.0, 120.0]),
            first_pentad: 24.0,
            window: 4,
            min_window_sum: 1.0,
            min_westerly: 2,
            level: LevelSelection::default(),
        }
    }
}
