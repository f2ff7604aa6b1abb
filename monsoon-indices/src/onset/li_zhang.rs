//! Li & Zhang (2009) wind-rotation onset and withdrawal
//!
//! The monsoon is marked by the low-level wind turning away from its winter direction.
//! For each grid cell in 0-40°N, 40-180°E:
//!
//! 1. $\beta(t)$ is the angle between the 850 hPa wind and the January mean wind, and
//!    $\beta_{JA}$ the angle between the July-August mean wind and the January mean.
//! 2. Onset is searched over January-June and withdrawal over September-December,
//!    gated by $\beta$ staying above $\beta_{JA}/2$ for `sustain_steps` steps and
//!    placed at the largest change in slope of $\beta$
//!    (see [`monsoon_core::rotation`]).
//! 3. Steps are converted to pentads of the year.
//!
//! The winds need a calendar time axis, since the search windows are defined by month.

use crate::parameters::LiZhangParameters;
use crate::series::at_level;
use monsoon_core::errors::{MonsoonError, MonsoonResult};
use monsoon_core::rotation::{rotation_angle, rotation_transition, step_to_pentad, Transition};
use monsoon_core::smoothing::smooth_harmonics;
use monsoon_core::{AxisKind, Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};

/// Onset and withdrawal pentads per grid cell, NaN where none was found
#[derive(Debug, Clone, PartialEq)]
pub struct RotationSeason {
    pub onset: GriddedField,
    pub withdrawal: GriddedField,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiZhang {
    parameters: LiZhangParameters,
}

fn mean_over(series: &[f64], months: &[u32], wanted: &[u32]) -> f64 {
    let selected: Vec<f64> = series
        .iter()
        .zip(months)
        .filter(|(_, m)| wanted.contains(m))
        .map(|(&x, _)| x)
        .collect();
    if selected.is_empty() {
        f64::NAN
    } else {
        selected.iter().sum::<f64>() / selected.len() as f64
    }
}

impl LiZhang {
    pub fn new() -> Self {
        Self::from_parameters(LiZhangParameters::default())
    }

    pub fn from_parameters(parameters: LiZhangParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &LiZhangParameters {
        &self.parameters
    }

    fn restrict(&self, field: &GriddedField) -> MonsoonResult<GriddedField> {
        let region = &self.parameters.region;
        let (_, lat) = field.require(AxisKind::Latitude)?;
        let (_, lon) = field.require(AxisKind::Longitude)?;
        let lat_idx = region.latitude_indices(&lat.values);
        let lon_idx = region.longitude_indices(&lon.values);
        field
            .select(AxisKind::Latitude, &lat_idx)?
            .select(AxisKind::Longitude, &lon_idx)
    }

    /// Onset and withdrawal pentads for one cell's wind series
    fn cell_season(&self, u: &[f64], v: &[f64], months: &[u32]) -> (f64, f64) {
        let u_jan = mean_over(u, months, &[1]);
        let v_jan = mean_over(v, months, &[1]);
        let u_ja = mean_over(u, months, &[7, 8]);
        let v_ja = mean_over(v, months, &[7, 8]);

        let beta: Vec<f64> = u
            .iter()
            .zip(v)
            .map(|(&u, &v)| rotation_angle(u, v, u_jan, v_jan))
            .collect();
        let threshold = rotation_angle(u_ja, v_ja, u_jan, v_jan) / 2.0;
        let p = self.parameters.sustain_steps;

        let onset_steps: Vec<usize> = (0..months.len()).filter(|&i| months[i] <= 6).collect();
        let onset_beta: Vec<f64> = onset_steps.iter().map(|&i| beta[i]).collect();
        let onset = rotation_transition(&onset_beta, threshold, p, Transition::Onset)
            .map_or(f64::NAN, |i| step_to_pentad(i, 0));

        let withdrawal_steps: Vec<usize> =
            (0..months.len()).filter(|&i| months[i] >= 9).collect();
        let withdrawal_beta: Vec<f64> = withdrawal_steps.iter().map(|&i| beta[i]).collect();
        let offset = withdrawal_steps.first().copied().unwrap_or(0);
        let withdrawal = rotation_transition(&withdrawal_beta, threshold, p, Transition::Withdrawal)
            .map_or(f64::NAN, |i| step_to_pentad(i, offset));

        (onset, withdrawal)
    }

    /// Onset and withdrawal pentads from zonal and meridional wind
    ///
    /// Both winds must share one grid and carry a calendar on their time axis.
    pub fn calculate(
        &self,
        u: &GriddedField,
        v: &GriddedField,
    ) -> MonsoonResult<Diagnosed<RotationSeason>> {
        let mut notices = vec![];
        let mut u = self.restrict(&at_level(u, &self.parameters.level, &mut notices)?.field)?;
        let mut v = self.restrict(&at_level(v, &self.parameters.level, &mut notices)?.field)?;
        if u.shape() != v.shape() {
            return Err(MonsoonError::Misaligned(format!(
                "u has shape {:?} but v has shape {:?}",
                u.shape(),
                v.shape()
            )));
        }
        let months = u.months()?;

        if self.parameters.smooth {
            u = smooth_harmonics(&u, AxisKind::Time)?;
            v = smooth_harmonics(&v, AxisKind::Time)?;
        }

        let u_cells = u.cells_along(AxisKind::Time)?;
        let v_cells = v.cells_along(AxisKind::Time)?;
        let (onset, withdrawal): (Vec<f64>, Vec<f64>) = (0..u_cells.n_cells())
            .map(|i| self.cell_season(&u_cells.cell(i), &v_cells.cell(i), &months))
            .unzip();

        tracing::debug!(
            cells = onset.len(),
            onsets = onset.iter().filter(|x| !x.is_nan()).count(),
            withdrawals = withdrawal.iter().filter(|x| !x.is_nan()).count(),
            "Searched wind rotation season"
        );
        Ok(Diagnosed::with_notices(
            RotationSeason {
                onset: u_cells.collapse(onset)?,
                withdrawal: u_cells.collapse(withdrawal)?,
            },
            notices,
        ))
    }
}
