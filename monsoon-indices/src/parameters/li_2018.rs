//! Li et al. (2018) Meiyu front parameters

use monsoon_core::levels::LevelSelection;
use monsoon_core::region::RegionBox;
use serde::{Deserialize, Serialize};

/// Parameters for the Li et al. (2018) Meiyu-Baiu front detection
///
/// The thresholds were tuned on a 0.5° grid. On coarser grids the front is smeared
/// over fewer, wider cells, so the gradient threshold is divided by the latitude
/// spacing and the continuity threshold becomes the latitude spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Li2018Parameters {
    /// Default: 22-40°N, 105-145°E
    pub region: RegionBox,

    /// Meridional equivalent potential temperature gradient marking the front (K/km).
    ///
    /// Default: 0.04 K/km
    pub gradient_threshold: f64,

    /// Mean latitude jump between neighbouring longitudes allowed along the front (degrees).
    ///
    /// Default: 1.0
    pub continuity_threshold: f64,

    /// Grid spacing the thresholds were tuned for (degrees).
    ///
    /// Default: 0.5
    pub reference_resolution: f64,

    /// Fraction of region cells that must exceed the gradient threshold.
    ///
    /// 200 of the 2880 region cells on the 0.5° grid of the paper.
    /// Default: 5/72
    pub cell_fraction: f64,

    /// Default: 850 hPa, level coordinate in Pa
    pub level: LevelSelection,
}

impl Default for Li2018Parameters {
    fn default() -> Self {
        Self {
            region: RegionBox::new([22.0, 40.0], [105.0, 145.0]),
            gradient_threshold: 0.04,
            continuity_threshold: 1.0,
            reference_resolution: 0.5,
            cell_fraction: 5.0 / 72.0,
            level: LevelSelection::default(),
        }
    }
}

impl Li2018Parameters {
    /// Gradient and continuity thresholds for a grid with latitude spacing `latres`
    pub fn thresholds_for(&self, latres: f64) -> (f64, f64) {
        if latres > self.reference_resolution {
            (self.gradient_threshold / latres, latres)
        } else {
            (self.gradient_threshold, self.continuity_threshold)
        }
    }
}
