//! Wang & Fan (1999) parameters

use monsoon_core::levels::LevelSelection;
use monsoon_core::region::RegionBox;
use serde::{Deserialize, Serialize};

/// Parameters for the Wang & Fan (1999) western North Pacific shear index
///
/// The index is the 850 hPa zonal wind averaged over a tropical box minus the same
/// average over a subtropical box further north-east:
///
/// $$WNPMI = \bar{u}_{850}(5-15°N, 90-130°E) - \bar{u}_{850}(22.5-32.5°N, 110-140°E)$$
///
/// Both boxes are given on a 0..360 longitude grid and are not shifted for fields on
/// -180..180.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WangFanParameters {
    /// Tropical box whose mean is taken first.
    ///
    /// Default: 5-15°N, 90-130°E
    pub southern: RegionBox,

    /// Subtropical box whose mean is subtracted.
    ///
    /// Default: 22.5-32.5°N, 110-140°E
    pub northern: RegionBox,

    /// Pressure level to extract when the wind has a level axis.
    ///
    /// Default: 850 hPa, level coordinate in Pa
    pub level: LevelSelection,
}

impl Default for WangFanParameters {
    fn default() -> Self {
        Self {
            southern: RegionBox::new([5.0, 15.0], [90.0, 130.0]),
            northern: RegionBox::new([22.5, 32.5], [110.0, 140.0]),
            level: LevelSelection::default(),
        }
    }
}
