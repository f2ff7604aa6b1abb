//! Gao et al. (2001) South China Sea monsoon onset
//!
//! As described by Martin et al. (2019). Onset is the first pentad $i$ with
//!
//! - regional mean 850 hPa $\theta_e$ above 335 K,
//! - westerly mean wind at pentads $i$ and $i+1$,
//! - and the westerlies then persisting: either westerly at $i+2$ with at least one
//!   westerly pentad in $i+3 \dots i+5$, or a single-pentad break at $i+2$ followed by
//!   westerlies at $i+3$.
//!
//! Pentads near the end of the series cannot be checked against the following pentads;
//! reaching them ends the search without an onset.
//!
//! The break branch follows the published criterion, so a break at $i+2$ followed by
//! westerlies at $i+3$ is an onset. Implementations that compare a 0/1 westerly mask
//! against zero never take this branch and need westerlies at $i+2$ instead.

use crate::parameters::Gao2001Parameters;
use crate::series::{at_level, pressure_pa, time_series};
use monsoon_core::errors::MonsoonResult;
use monsoon_core::reduce::{area_mean, CellAreaGrid};
use monsoon_core::thermo::theta_e_field;
use monsoon_core::{Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gao2001 {
    parameters: Gao2001Parameters,
}

impl Gao2001 {
    pub fn new() -> Self {
        Self::from_parameters(Gao2001Parameters::default())
    }

    pub fn from_parameters(parameters: Gao2001Parameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &Gao2001Parameters {
        &self.parameters
    }

    /// Onset pentad from regional mean $\theta_e$ and zonal wind series
    pub fn find_onset(&self, theta_e: &[f64], u: &[f64], pentads: &[f64]) -> Option<f64> {
        let n = u.len().min(theta_e.len());
        let westerly = |i: usize| u[i] > 0.0;

        for i in 0..n {
            if !(theta_e[i] > self.parameters.theta_e_threshold && westerly(i)) {
                continue;
            }
            if i + 1 >= n {
                return None;
            }
            if !westerly(i + 1) {
                continue;
            }
            if i + 2 >= n {
                return None;
            }
            if westerly(i + 2) {
                if i + 5 >= n {
                    return None;
                }
                if (i + 3..=i + 5).any(westerly) {
                    return Some(pentads[i]);
                }
            } else {
                if i + 3 >= n {
                    return None;
                }
                if westerly(i + 3) {
                    return Some(pentads[i]);
                }
            }
        }
        None
    }

    /// Onset pentad from temperature (K), specific humidity (kg/kg) and zonal wind (m/s)
    ///
    /// All three fields share one grid with a pentad time axis.
    pub fn calculate(
        &self,
        t: &GriddedField,
        q: &GriddedField,
        u: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<Option<f64>>> {
        let p = &self.parameters;
        let mut notices = vec![];
        let t = at_level(t, &p.level, &mut notices)?;
        let q = at_level(q, &p.level, &mut notices)?.field;
        let u = at_level(u, &p.level, &mut notices)?.field;

        let theta_e = theta_e_field(&t.field, &q, pressure_pa(&t, &p.level))?;
        let theta_e = area_mean(&theta_e, &p.region, area)?.drain_into(&mut notices);
        // weighted like theta_e, so any notice is already recorded
        let u = area_mean(&u, &p.region, area)?.value;

        let (theta_e, pentads) = time_series(&theta_e)?;
        let (u, _) = time_series(&u)?;
        let onset = self.find_onset(&theta_e, &u, &pentads);
        Ok(Diagnosed::with_notices(onset, notices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pentads(n: usize) -> Vec<f64> {
        (1..=n).map(|p| p as f64).collect()
    }

    #[test]
    fn steady_westerlies() {
        let theta_e = vec![340.0; 40];
        let mut u = vec![-1.0; 40];
        for value in u.iter_mut().skip(20).take(4) {
            *value = 2.0;
        }
        assert_eq!(Gao2001::new().find_onset(&theta_e, &u, &pentads(40)), Some(21.0));
    }

    #[test]
    fn single_pentad_break() {
        let theta_e = vec![340.0; 40];
        let mut u = vec![-1.0; 40];
        u[10] = 2.0;
        u[11] = 2.0;
        u[13] = 2.0;
        assert_eq!(Gao2001::new().find_onset(&theta_e, &u, &pentads(40)), Some(11.0));
    }

    #[test]
    fn cold_air_blocks_onset() {
        let mut theta_e = vec![330.0; 40];
        let u = vec![2.0; 40];
        assert_eq!(Gao2001::new().find_onset(&theta_e, &u, &pentads(40)), None);
        theta_e[25] = 336.0;
        assert_eq!(Gao2001::new().find_onset(&theta_e, &u, &pentads(40)), Some(26.0));
    }

    #[test]
    fn search_stops_at_series_end() {
        let theta_e = vec![340.0; 10];
        let mut u = vec![-1.0; 10];
        u[8] = 1.0;
        u[9] = 1.0;
        assert_eq!(Gao2001::new().find_onset(&theta_e, &u, &pentads(10)), None);
    }
}
