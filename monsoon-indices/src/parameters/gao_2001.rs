//! Gao et al. (2001) South China Sea onset parameters

use monsoon_core::levels::LevelSelection;
use monsoon_core::region::RegionBox;
use serde::{Deserialize, Serialize};

/// Parameters for the Gao et al. (2001) South China Sea monsoon onset
///
/// Combines a moist airmass criterion (850 hPa equivalent potential temperature) with
/// a steady westerly criterion on the regional mean zonal wind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gao2001Parameters {
    /// Default: 10-20°N, 110-120°E
    pub region: RegionBox,

    /// Equivalent potential temperature to exceed (K).
    ///
    /// Martin et al. (2019) use 340 K; 335 K suits the JRA-55 and CMIP6
    /// climatologies better.
    /// Default: 335.0 K
    pub theta_e_threshold: f64,

    /// Default: 850 hPa, level coordinate in Pa
    pub level: LevelSelection,
}

impl Default for Gao2001Parameters {
    fn default() -> Self {
        Self {
            region: RegionBox::new([10.0, 20.0], [110.0, 120.0]),
            theta_e_threshold: 335.0,
            level: LevelSelection::default(),
        }
    }
}
