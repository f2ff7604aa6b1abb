//! Wang & Fan (1999) western North Pacific monsoon index
//!
//! Difference between the 850 hPa zonal wind averaged over 5-15°N, 90-130°E and over
//! 22.5-32.5°N, 110-140°E. Every axis other than latitude, longitude and level is kept,
//! so a wind field with a time axis gives an index time series.
//!
//! The boxes are not moved for fields on -180..180 longitudes.

use crate::parameters::WangFanParameters;
use crate::series::at_level;
use monsoon_core::errors::MonsoonResult;
use monsoon_core::reduce::{area_mean_difference, CellAreaGrid};
use monsoon_core::{Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};

/// Wang & Fan (1999) shear index
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WangFan {
    parameters: WangFanParameters,
}

impl WangFan {
    pub fn new() -> Self {
        Self::from_parameters(WangFanParameters::default())
    }

    pub fn from_parameters(parameters: WangFanParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &WangFanParameters {
        &self.parameters
    }

    /// Calculate the index from zonal wind
    ///
    /// `u` needs latitude and longitude axes; a level axis is reduced to the configured
    /// level first.
    pub fn calculate(
        &self,
        u: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>> {
        let mut notices = vec![];
        let u = at_level(u, &self.parameters.level, &mut notices)?.field;
        let (index, mut reduce_notices) = area_mean_difference(
            &u,
            &self.parameters.southern,
            Some(&self.parameters.northern),
            area,
        )?
        .into_parts();
        notices.append(&mut reduce_notices);
        Ok(Diagnosed::with_notices(index, notices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use monsoon_core::{Coordinate, Notice};
    use ndarray::{ArrayD, IxDyn};

    fn wind(levels: Vec<f64>) -> GriddedField {
        let lats: Vec<f64> = (0..9).map(|i| i as f64 * 5.0).collect();
        let lons: Vec<f64> = (0..12).map(|i| 80.0 + i as f64 * 5.0).collect();
        let nlev = levels.len();
        // westerlies in the tropics, easterlies further north, stronger at lower levels
        let values = ArrayD::from_shape_fn(IxDyn(&[nlev, lats.len(), lons.len()]), |idx| {
            let u = if lats[idx[1]] <= 15.0 { 8.0 } else { -3.0 };
            u * (nlev - idx[0]) as f64
        });
        GriddedField::new(
            values,
            vec![
                Coordinate::level(levels),
                Coordinate::latitude(lats),
                Coordinate::longitude(lons),
            ],
        )
        .unwrap()
    }

    #[test]
    fn shear_between_boxes() {
        let u = wind(vec![100000.0, 85000.0]);
        let index = WangFan::new().calculate(&u, None).unwrap();
        assert!(!index.has_notices());
        // 850 hPa is the second level: u = 8 south, -3 north
        assert_relative_eq!(index.value.scalar().unwrap(), 11.0, epsilon = 1e-12);
    }

    #[test]
    fn nearest_level_is_reported() {
        let u = wind(vec![100000.0, 87500.0, 50000.0]);
        let index = WangFan::new().calculate(&u, None).unwrap();
        assert_eq!(index.notices.len(), 1);
        assert!(matches!(
            index.notices[0],
            Notice::NearestLevelSubstituted { found, .. } if found == 87500.0
        ));
        assert_relative_eq!(index.value.scalar().unwrap(), 22.0, epsilon = 1e-12);
    }
}
