//! Wang & LinHo (2002) rainy season
//!
//! The rainy season is the period over which smoothed pentad precipitation exceeds
//! the dry-season reference by at least 5 mm/day. The peak is the pentad of largest
//! excess.

use crate::parameters::WangLinHoParameters;
use monsoon_core::errors::MonsoonResult;
use monsoon_core::onset::{detect_season, SeasonRecord, ThresholdMode};
use monsoon_core::smoothing::smooth_harmonics;
use monsoon_core::{AxisKind, GriddedField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WangLinHo {
    parameters: WangLinHoParameters,
}

impl WangLinHo {
    pub fn new() -> Self {
        Self::from_parameters(WangLinHoParameters::default())
    }

    pub fn from_parameters(parameters: WangLinHoParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &WangLinHoParameters {
        &self.parameters
    }

    /// Onset, withdrawal and peak pentads and season duration
    ///
    /// `pentads` is a pentad precipitation climatology (mm/day). `reference` is the
    /// January (northern hemisphere) or July (southern hemisphere) mean on the same
    /// grid, with the axes of `pentads` other than time, in the same order.
    pub fn calculate(
        &self,
        pentads: &GriddedField,
        reference: &GriddedField,
    ) -> MonsoonResult<SeasonRecord> {
        let smooth = smooth_harmonics(pentads, AxisKind::Time)?;
        let relative = smooth.subtract_along(AxisKind::Time, reference)?;
        detect_season(
            &relative,
            AxisKind::Time,
            self.parameters.threshold,
            ThresholdMode::Absolute,
        )
    }
}
