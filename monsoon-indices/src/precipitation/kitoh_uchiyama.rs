//! Kitoh & Uchiyama (2006) rainy season
//!
//! Pentad precipitation is smoothed to its mean plus 12 harmonics and rescaled per grid
//! cell to the normalised pentad precipitation index
//!
//! $$NPPI = \frac{P - P_{min}}{P_{max} - P_{min}}$$
//!
//! The rainy season runs from the first to the last pentad with NPPI of at least 0.618.

use crate::parameters::KitohUchiyamaParameters;
use monsoon_core::errors::MonsoonResult;
use monsoon_core::onset::{detect_season, SeasonRecord, ThresholdMode};
use monsoon_core::smoothing::smooth_harmonics;
use monsoon_core::{AxisKind, GriddedField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitohUchiyama {
    parameters: KitohUchiyamaParameters,
}

impl KitohUchiyama {
    pub fn new() -> Self {
        Self::from_parameters(KitohUchiyamaParameters::default())
    }

    pub fn from_parameters(parameters: KitohUchiyamaParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &KitohUchiyamaParameters {
        &self.parameters
    }

    /// Onset, withdrawal and peak pentads and season duration
    ///
    /// `precipitation` is a pentad climatology (mm/day) with a time axis of pentads.
    pub fn calculate(&self, precipitation: &GriddedField) -> MonsoonResult<SeasonRecord> {
        let smooth = smooth_harmonics(precipitation, AxisKind::Time)?;
        detect_season(
            &smooth,
            AxisKind::Time,
            self.parameters.threshold,
            ThresholdMode::Normalised,
        )
    }
}
