//! Li & Zhang (2009) parameters

use monsoon_core::levels::LevelSelection;
use monsoon_core::region::RegionBox;
use serde::{Deserialize, Serialize};

/// Parameters for the Li & Zhang (2009) wind-rotation onset and withdrawal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiZhangParameters {
    /// Area searched.
    ///
    /// Default: 0-40°N, 40-180°E
    pub region: RegionBox,

    /// Consecutive steps the rotation must stay above half its July-August value.
    ///
    /// Default: 15
    pub sustain_steps: usize,

    /// Smooth the winds to their mean and first 12 harmonics before searching.
    ///
    /// Default: false
    pub smooth: bool,

    /// Default: 850 hPa, level coordinate in Pa
    pub level: LevelSelection,
}

impl Default for LiZhangParameters {
    fn default() -> Self {
        Self {
            region: RegionBox::new([0.0, 40.0], [40.0, 180.0]),
            sustain_steps: 15,
            smooth: false,
            level: LevelSelection::default(),
        }
    }
}
