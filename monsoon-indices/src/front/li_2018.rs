//! Li et al. (2018) Meiyu-Baiu front
//!
//! The front is a band of strong meridional $\theta_e$ gradient over East Asia.
//! For each time step:
//!
//! 1. $\theta_e$ is computed on the selected level and differentiated along latitude,
//!    giving $|\partial\theta_e/\partial y|$ in K/km.
//! 2. Within 22-40°N, 105-145°E, the front latitude at each longitude is the mean
//!    latitude of cells above the gradient threshold.
//! 3. The step only counts as a front day when enough cells exceed the threshold and
//!    the front is continuous: $\sum |\Delta \phi| / (n_{lat} - 1)$ along longitude must
//!    stay below the continuity threshold. Otherwise every longitude is NaN.
//!
//! The thresholds were tuned on a 0.5° grid and are relaxed on coarser grids.

use crate::parameters::Li2018Parameters;
use crate::series::{at_level, pressure_pa};
use monsoon_core::errors::{MonsoonError, MonsoonResult};
use monsoon_core::gradient::gradient_along;
use monsoon_core::thermo::{theta_e_field, EARTH_RADIUS};
use monsoon_core::{AxisKind, Diagnosed, GriddedField};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Front latitude per longitude, and the gradient it was found from
#[derive(Debug, Clone, PartialEq)]
pub struct MeiyuFront {
    /// Other axes x longitude, NaN where there was no front
    pub latitude: GriddedField,
    /// $|\partial\theta_e/\partial y|$ (K/km) over the region
    pub gradient: GriddedField,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Li2018 {
    parameters: Li2018Parameters,
}

/// Front latitudes across one latitude x longitude block of gradients
fn block_front(
    gradient: ArrayView2<f64>,
    lats: &[f64],
    threshold: f64,
    continuity: f64,
    min_cells: f64,
) -> Vec<f64> {
    let (nlat, nlon) = gradient.dim();
    let mut exceeding = 0;
    let mut front: Vec<f64> = (0..nlon)
        .map(|j| {
            let hits: Vec<f64> = (0..nlat)
                .filter(|&i| gradient[[i, j]] > threshold)
                .map(|i| lats[i])
                .collect();
            exceeding += hits.len();
            if hits.is_empty() {
                f64::NAN
            } else {
                hits.iter().sum::<f64>() / hits.len() as f64
            }
        })
        .collect();

    let jumps: f64 = front
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|d| !d.is_nan())
        .sum();
    let continuous = jumps / (nlat as f64 - 1.0) < continuity;

    if !(exceeding as f64 > min_cells && continuous) {
        front.fill(f64::NAN);
    }
    front
}

impl Li2018 {
    pub fn new() -> Self {
        Self::from_parameters(Li2018Parameters::default())
    }

    pub fn from_parameters(parameters: Li2018Parameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &Li2018Parameters {
        &self.parameters
    }

    /// Meridional $\theta_e$ gradient (K/km) over the whole grid
    fn theta_e_gradient(&self, theta_e: &GriddedField) -> MonsoonResult<GriddedField> {
        let lats = theta_e.require(AxisKind::Latitude)?.1.values.clone();
        // K/degree to K/km
        let scale = 180.0 / PI / EARTH_RADIUS * 1000.0;
        theta_e
            .cells_along(AxisKind::Latitude)?
            .map_cells(|series| {
                gradient_along(series, &lats)
                    .map(|g| g.iter().map(|x| (x * scale).abs()).collect())
                    .unwrap_or_default()
            })?
            .into_field()
    }

    /// Front latitudes from temperature (K) and specific humidity (kg/kg)
    pub fn calculate(
        &self,
        t: &GriddedField,
        q: &GriddedField,
    ) -> MonsoonResult<Diagnosed<MeiyuFront>> {
        let params = &self.parameters;
        let mut notices = vec![];
        let t = at_level(t, &params.level, &mut notices)?;
        let q = at_level(q, &params.level, &mut notices)?;
        let theta_e = theta_e_field(&t.field, &q.field, pressure_pa(&t, &params.level))?;

        let lats = &theta_e.require(AxisKind::Latitude)?.1.values;
        if lats.len() < 2 {
            return Err(MonsoonError::Error(format!(
                "Front detection needs at least two latitudes, found {}",
                lats.len()
            )));
        }
        let (threshold, continuity) = params.thresholds_for(lats[1] - lats[0]);

        let gradient = self.theta_e_gradient(&theta_e)?;
        let lat_idx = params
            .region
            .latitude_indices(&gradient.require(AxisKind::Latitude)?.1.values);
        let lon_idx = params
            .region
            .longitude_indices(&gradient.require(AxisKind::Longitude)?.1.values);
        let gradient = gradient
            .select(AxisKind::Latitude, &lat_idx)?
            .select(AxisKind::Longitude, &lon_idx)?;

        let blocks = gradient.spatial_blocks()?;
        let (steps, nlat, nlon) = blocks.blocks.dim();
        let min_cells = params.cell_fraction * (nlat * nlon) as f64;
        let front: Vec<f64> = blocks
            .blocks
            .outer_iter()
            .flat_map(|block| {
                block_front(block, &blocks.latitude.values, threshold, continuity, min_cells)
            })
            .collect();

        tracing::debug!(
            steps,
            threshold,
            continuity,
            min_cells,
            "Searched for Meiyu front"
        );
        let latitude = blocks.collapse(front, vec![blocks.longitude.clone()])?;
        Ok(Diagnosed::with_notices(
            MeiyuFront { latitude, gradient },
            notices,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monsoon_core::Coordinate;
    use ndarray::{arr2, ArrayD, IxDyn};

    #[test]
    fn block_front_averages_latitudes() {
        let lats = [20.0, 21.0, 22.0];
        let gradient = arr2(&[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
        let front = block_front(gradient.view(), &lats, 0.5, 1.0, 2.0);
        assert_eq!(front, vec![21.5, 20.5]);
    }

    #[test]
    fn discontinuous_front_is_dropped() {
        let lats = [20.0, 21.0, 22.0];
        let gradient = arr2(&[[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        // jumps of 2 and 2 over two latitude intervals
        let front = block_front(gradient.view(), &lats, 0.5, 1.0, 0.0);
        assert!(front.iter().all(|x| x.is_nan()));
        let front = block_front(gradient.view(), &lats, 0.5, 3.0, 0.0);
        assert_eq!(front, vec![20.0, 22.0, 20.0]);
    }

    #[test]
    fn too_few_cells_is_no_front() {
        let lats = [20.0, 21.0];
        let gradient = arr2(&[[1.0, 0.0], [0.0, 0.0]]);
        let front = block_front(gradient.view(), &lats, 0.5, 1.0, 1.0);
        assert!(front.iter().all(|x| x.is_nan()));
    }

    /// Dry air with a 10 K temperature step between 29°N and 30°N, east of `edge`
    fn stepped_temperature(edge: f64) -> (GriddedField, GriddedField) {
        let lats: Vec<f64> = (20..=42).map(f64::from).collect();
        let lons: Vec<f64> = (0..=10).map(|i| 100.0 + 5.0 * i as f64).collect();
        let t = ArrayD::from_shape_fn(IxDyn(&[lats.len(), lons.len()]), |idx| {
            if lats[idx[0]] >= 30.0 && lons[idx[1]] <= edge {
                310.0
            } else {
                300.0
            }
        });
        let coords = vec![Coordinate::latitude(lats), Coordinate::longitude(lons)];
        let q = ArrayD::zeros(IxDyn(&[23, 11]));
        (
            GriddedField::new(t, coords.clone()).unwrap(),
            GriddedField::new(q, coords).unwrap(),
        )
    }

    #[test]
    fn finds_front_at_temperature_step() {
        let (t, q) = stepped_temperature(180.0);
        let front = Li2018::new().calculate(&t, &q).unwrap();
        assert!(!front.has_notices());

        let latitude = &front.value.latitude;
        assert_eq!(
            latitude.coord(AxisKind::Longitude).unwrap().values,
            vec![105.0, 110.0, 115.0, 120.0, 125.0, 130.0, 135.0, 140.0, 145.0]
        );
        assert!(latitude.values().iter().all(|&x| x == 29.5));
        assert_eq!(front.value.gradient.shape(), &[19, 9]);
    }

    #[test]
    fn partial_front_is_rejected() {
        // only 4 of 9 longitudes carry the step: 8 cells against 11.875 needed
        let (t, q) = stepped_temperature(120.0);
        let front = Li2018::new().calculate(&t, &q).unwrap();
        assert!(front.value.latitude.values().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn single_latitude_is_an_error() {
        let coords = vec![Coordinate::latitude(vec![30.0]), Coordinate::longitude(vec![120.0])];
        let t = GriddedField::new(ArrayD::from_elem(IxDyn(&[1, 1]), 300.0), coords).unwrap();
        assert!(Li2018::new().calculate(&t, &t.map_values(|_| 0.0)).is_err());
    }
}
