//! Yim et al. (2014) precipitation index parameters

use monsoon_core::region::{LongitudeShift, RegionBox, RegionSpec, RegionTable};
use serde::{Deserialize, Serialize};

/// Regional monsoon precipitation boxes of Yim et al. (2014)
///
/// The North African box (NAF) straddles the prime meridian, from 330°E to 30°E. On a
/// -180..180 grid only its western bound is moved, which turns it into -30..30.
pub fn yim_precipitation_regions() -> RegionTable {
    let single = |lat: [f64; 2], lon: [f64; 2]| {
        RegionSpec::single(RegionBox::new(lat, lon), LongitudeShift::Both)
    };
    RegionTable::new()
        .with("IN", single([10.0, 30.0], [70.0, 105.0]))
        .with("WNP", single([12.5, 22.5], [110.0, 150.0]))
        .with("EA", single([22.5, 45.0], [110.0, 135.0]))
        .with("NAM", single([7.5, 22.5], [250.0, 280.0]))
        .with(
            "NAF",
            RegionSpec::single(RegionBox::new([5.0, 15.0], [330.0, 30.0]), LongitudeShift::MinOnly),
        )
        .with("SAM", single([-25.0, -5.0], [290.0, 320.0]))
        .with("SAF", single([-25.0, -7.5], [25.0, 70.0]))
        .with("AUS", single([-20.0, -5.0], [110.0, 150.0]))
}

/// Parameters for the Yim et al. (2014) precipitation index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YimPrecipitationParameters {
    /// Key into `regions`.
    ///
    /// Default: "IN"
    pub region: String,

    /// Default: [`yim_precipitation_regions`]
    pub regions: RegionTable,
}

impl Default for YimPrecipitationParameters {
    fn default() -> Self {
        Self {
            region: "IN".to_string(),
            regions: yim_precipitation_regions(),
        }
    }
}
