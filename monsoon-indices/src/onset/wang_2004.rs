//! Wang et al. (2004) South China Sea monsoon onset

use crate::parameters::Wang2004Parameters;
use crate::series::{at_level, time_series};
use monsoon_core::errors::MonsoonResult;
use monsoon_core::reduce::{area_mean, CellAreaGrid};
use monsoon_core::{Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};

/// Regional mean zonal wind and the onset pentad found in it
#[derive(Debug, Clone, PartialEq)]
pub struct Wang2004Onset {
    pub u_mean: GriddedField,
    /// Pentad number of onset, `None` when the criteria are never met
    pub onset: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wang2004 {
    parameters: Wang2004Parameters,
}

impl Wang2004 {
    pub fn new() -> Self {
        Self::from_parameters(Wang2004Parameters::default())
    }

    pub fn from_parameters(parameters: Wang2004Parameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &Wang2004Parameters {
        &self.parameters
    }

    /// First pentad meeting the onset criteria in a regional mean wind series
    ///
    /// `pentads` labels each step. Windows reaching past the end of the series are
    /// truncated.
    pub fn find_onset(&self, u_mean: &[f64], pentads: &[f64]) -> Option<f64> {
        let p = &self.parameters;
        let candidates: Vec<usize> = (0..pentads.len())
            .filter(|&i| pentads[i] >= p.first_pentad)
            .collect();
        candidates.iter().enumerate().find_map(|(k, &i)| {
            let window: Vec<f64> = candidates[k..]
                .iter()
                .take(p.window)
                .map(|&j| u_mean[j])
                .collect();
            let westerly = window.iter().filter(|&&u| u > 0.0).count();
            let onset = u_mean[i] > 0.0
                && window.iter().sum::<f64>() > p.min_window_sum
                && westerly >= p.min_westerly;
            onset.then_some(pentads[i])
        })
    }

    /// Regional mean 850 hPa zonal wind and onset pentad
    ///
    /// `u` must have a pentad time axis and no axes other than latitude, longitude
    /// and (optionally) level.
    pub fn calculate(
        &self,
        u: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<Wang2004Onset>> {
        let mut notices = vec![];
        let u = at_level(u, &self.parameters.level, &mut notices)?.field;
        let u_mean = area_mean(&u, &self.parameters.region, area)?.drain_into(&mut notices);
        let (series, pentads) = time_series(&u_mean)?;
        let onset = self.find_onset(&series, &pentads);
        if onset.is_none() {
            tracing::info!("No South China Sea monsoon onset found");
        }
        Ok(Diagnosed::with_notices(Wang2004Onset { u_mean, onset }, notices))
    }
}
