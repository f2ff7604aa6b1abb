//! Yim et al. (2014) circulation index parameters

use monsoon_core::levels::LevelSelection;
use monsoon_core::region::{LongitudeShift, RegionBox, RegionSpec, RegionTable};
use serde::{Deserialize, Serialize};

/// Regional monsoon circulation boxes of Yim et al. (2014)
///
/// Each entry is the difference of 850 hPa zonal wind means between a southern and a
/// northern box, a proxy for low-level relative vorticity. The North African monsoon
/// (NAFSM) uses its southern box alone.
pub fn yim_vorticity_regions() -> RegionTable {
    let pair = |a: RegionBox, b: RegionBox| RegionSpec::pair(a, b, LongitudeShift::Both);
    RegionTable::new()
        .with(
            "ISM",
            pair(
                RegionBox::new([5.0, 15.0], [40.0, 80.0]),
                RegionBox::new([25.0, 35.0], [70.0, 90.0]),
            ),
        )
        .with(
            "WNPSM",
            pair(
                RegionBox::new([5.0, 15.0], [100.0, 130.0]),
                RegionBox::new([20.0, 35.0], [110.0, 140.0]),
            ),
        )
        .with(
            "NASM",
            pair(
                RegionBox::new([5.0, 15.0], [230.0, 260.0]),
                RegionBox::new([20.0, 30.0], [250.0, 280.0]),
            ),
        )
        .with(
            "NAFSM",
            RegionSpec::single(
                RegionBox::new([0.0, 15.0], [300.0, 350.0]),
                LongitudeShift::Both,
            ),
        )
        .with(
            "SASM",
            pair(
                RegionBox::new([-20.0, -5.0], [290.0, 320.0]),
                RegionBox::new([-35.0, -20.0], [290.0, 320.0]),
            ),
        )
        .with(
            "SAFSM",
            pair(
                RegionBox::new([-15.0, -5.0], [20.0, 50.0]),
                RegionBox::new([-30.0, -20.0], [30.0, 55.0]),
            ),
        )
        .with(
            "AUSSM",
            pair(
                RegionBox::new([-15.0, 0.0], [90.0, 130.0]),
                RegionBox::new([-30.0, -20.0], [100.0, 140.0]),
            ),
        )
}

/// Parameters for the Yim et al. (2014) circulation index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YimVorticityParameters {
    /// Key into `regions`.
    ///
    /// Default: "ISM"
    pub region: String,

    /// Region boxes by key.
    ///
    /// Default: [`yim_vorticity_regions`]
    pub regions: RegionTable,

    /// Pressure level to extract when the wind has a level axis.
    ///
    /// Default: 850 hPa, level coordinate in Pa
    pub level: LevelSelection,
}

impl Default for YimVorticityParameters {
    fn default() -> Self {
        Self {
            region: "ISM".to_string(),
            regions: yim_vorticity_regions(),
            level: LevelSelection::default(),
        }
    }
}
