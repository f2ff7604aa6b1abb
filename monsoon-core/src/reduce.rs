//! Area-weighted regional means
//!
//! Reduces the latitude and longitude axes of a field to one weighted mean over a
//! [`RegionBox`], keeping every other axis. Shear-type indices take the difference of
//! the means over two boxes.
//!
//! Weights are true cell areas when a [`CellAreaGrid`] on the same grid is supplied,
//! otherwise the cosine of latitude:
//!
//! $$ \bar{f} = \frac{\sum_{lat} \cos\theta \, \frac{1}{n_{lon}} \sum_{lon} f}{\sum_{lat} \cos\theta} $$
//!
//! An area grid that does not match the field is not an error. The cosine weights are
//! used instead and the result carries [`Notice::AreaWeightsRejected`].
//!
//! # Examples
//!
//! ```rust
//! use monsoon_core::grid::{Coordinate, GriddedField};
//! use monsoon_core::reduce::area_mean;
//! use monsoon_core::region::RegionBox;
//! use ndarray::{ArrayD, IxDyn};
//!
//! let field = GriddedField::new(
//!     ArrayD::from_elem(IxDyn(&[3, 4]), 2.0),
//!     vec![
//!         Coordinate::latitude(vec![0.0, 10.0, 20.0]),
//!         Coordinate::longitude(vec![100.0, 110.0, 120.0, 130.0]),
//!     ],
//! )
//! .unwrap();
//! let region = RegionBox::new([0.0, 10.0], [110.0, 130.0]);
//! let mean = area_mean(&field, &region, None).unwrap();
//!
//! assert!(!mean.has_notices());
//! assert!((mean.value.scalar().unwrap() - 2.0).abs() < 1e-12);
//! ```

use crate::axis::coordinates_agree;
use crate::errors::{MonsoonError, MonsoonResult};
use crate::grid::{AxisKind, Coordinate, GriddedField};
use crate::notice::{Diagnosed, Notice};
use crate::region::{RegionBox, RegionSpec};
use ndarray::{Array2, ArrayView2};

/// Grid-cell areas on a latitude-longitude grid
#[derive(Clone, Debug, PartialEq)]
pub struct CellAreaGrid {
    /// latitude x longitude
    areas: Array2<f64>,
    latitude: Coordinate,
    longitude: Coordinate,
}

impl CellAreaGrid {
    /// Wrap a two-dimensional latitude-longitude field of cell areas
    pub fn new(field: &GriddedField) -> MonsoonResult<Self> {
        let blocks = field.spatial_blocks()?;
        if field.ndim() != 2 {
            return Err(MonsoonError::Error(format!(
                "Cell areas must only have latitude and longitude axes, found {} axes",
                field.ndim()
            )));
        }
        let areas = blocks.blocks.index_axis(ndarray::Axis(0), 0).to_owned();
        Ok(Self {
            areas,
            latitude: blocks.latitude,
            longitude: blocks.longitude,
        })
    }

    pub fn areas(&self) -> ArrayView2<'_, f64> {
        self.areas.view()
    }

    /// Reason these areas cannot weight a field on the given grid, if any
    fn mismatch(&self, latitude: &Coordinate, longitude: &Coordinate) -> Option<String> {
        if self.latitude.len() != latitude.len() || self.longitude.len() != longitude.len() {
            return Some(format!(
                "cell areas are {}x{} but the field grid is {}x{}",
                self.latitude.len(),
                self.longitude.len(),
                latitude.len(),
                longitude.len()
            ));
        }
        if !coordinates_agree(&self.latitude.values, &latitude.values)
            || !coordinates_agree(&self.longitude.values, &longitude.values)
        {
            return Some("cell area coordinates differ from the field coordinates".to_string());
        }
        None
    }
}

/// Weighting resolved once per reduction
#[derive(Clone, Debug)]
enum Weighting<'a> {
    Area(ArrayView2<'a, f64>),
    CosLatitude,
}

fn resolve_weighting<'a>(
    latitude: &Coordinate,
    longitude: &Coordinate,
    area: Option<&'a CellAreaGrid>,
) -> Diagnosed<Weighting<'a>> {
    let Some(area) = area else {
        return Diagnosed::clean(Weighting::CosLatitude);
    };
    match area.mismatch(latitude, longitude) {
        None => Diagnosed::clean(Weighting::Area(area.areas())),
        Some(reason) => {
            tracing::warn!(
                reason = reason.as_str(),
                "Cell area weights not used, defaulting to cosine weighted averaging"
            );
            Diagnosed::with_notices(
                Weighting::CosLatitude,
                vec![Notice::AreaWeightsRejected { reason }],
            )
        }
    }
}

/// Weighted mean of one latitude-longitude block over the selected cells
fn block_mean(
    block: ArrayView2<f64>,
    lats: &[f64],
    lat_idx: &[usize],
    lon_idx: &[usize],
    weighting: &Weighting,
) -> f64 {
    if lat_idx.is_empty() || lon_idx.is_empty() {
        return f64::NAN;
    }
    match weighting {
        Weighting::Area(areas) => {
            let (total, weight) = lat_idx
                .iter()
                .flat_map(|&i| lon_idx.iter().map(move |&j| (i, j)))
                .fold((0.0, 0.0), |(total, weight), (i, j)| {
                    (total + block[[i, j]] * areas[[i, j]], weight + areas[[i, j]])
                });
            total / weight
        }
        Weighting::CosLatitude => {
            let (total, weight) = lat_idx.iter().fold((0.0, 0.0), |(total, weight), &i| {
                let cos_lat = lats[i].to_radians().cos();
                let zonal: f64 =
                    lon_idx.iter().map(|&j| block[[i, j]]).sum::<f64>() / lon_idx.len() as f64;
                (total + zonal * cos_lat, weight + cos_lat)
            });
            total / weight
        }
    }
}

/// Weighted means over each box, for every combination of the non-spatial axes
fn box_means(
    field: &GriddedField,
    regions: &[&RegionBox],
    area: Option<&CellAreaGrid>,
) -> MonsoonResult<Diagnosed<Vec<GriddedField>>> {
    let blocks = field.spatial_blocks()?;
    let weighting = resolve_weighting(&blocks.latitude, &blocks.longitude, area);

    let means = regions
        .iter()
        .map(|region| {
            let lat_idx = region.latitude_indices(&blocks.latitude.values);
            let lon_idx = region.longitude_indices(&blocks.longitude.values);
            if lat_idx.is_empty() || lon_idx.is_empty() {
                tracing::debug!(?region, "Region selects no grid points");
            }
            let values = blocks
                .blocks
                .outer_iter()
                .map(|block| {
                    block_mean(
                        block,
                        &blocks.latitude.values,
                        &lat_idx,
                        &lon_idx,
                        &weighting.value,
                    )
                })
                .collect();
            blocks.collapse(values, vec![])
        })
        .collect::<MonsoonResult<Vec<_>>>()?;
    Ok(Diagnosed::with_notices(means, weighting.notices))
}

/// Weighted mean over a single box
///
/// Latitude and longitude are removed; all other axes are kept in their original order.
/// A box containing no grid points gives NaN.
pub fn area_mean(
    field: &GriddedField,
    region: &RegionBox,
    area: Option<&CellAreaGrid>,
) -> MonsoonResult<Diagnosed<GriddedField>> {
    box_means(field, &[region], area)?.and_then(|mut means| {
        means
            .pop()
            .map(Diagnosed::clean)
            .ok_or_else(|| MonsoonError::Error("no regional mean computed".to_string()))
    })
}

/// Mean over `first` minus the mean over `second`
///
/// Without a second box the result is the mean over `first` alone. Both means share
/// the weighting decision, so at most one notice is attached.
pub fn area_mean_difference(
    field: &GriddedField,
    first: &RegionBox,
    second: Option<&RegionBox>,
    area: Option<&CellAreaGrid>,
) -> MonsoonResult<Diagnosed<GriddedField>> {
    let Some(second) = second else {
        return area_mean(field, first, area);
    };
    box_means(field, &[first, second], area)?.and_then(|means| match means.as_slice() {
        [a, b] => Ok(Diagnosed::clean(a.zip_with(b, |x, y| x - y)?)),
        _ => Err(MonsoonError::Error(
            "expected two regional means".to_string(),
        )),
    })
}

/// Reduce a field over a configured region
///
/// Region bounds are shifted onto the field's longitude convention first, following
/// the region's [`crate::region::LongitudeShift`].
pub fn reduce_region(
    field: &GriddedField,
    region: &RegionSpec,
    area: Option<&CellAreaGrid>,
) -> MonsoonResult<Diagnosed<GriddedField>> {
    let (_, longitude) = field.require(AxisKind::Longitude)?;
    let region = region.normalised_for(longitude.min());
    area_mean_difference(field, &region.primary, region.secondary.as_ref(), area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::LongitudeShift;
    use approx::assert_relative_eq;
    use ndarray::{ArrayD, IxDyn};

    fn lats() -> Vec<f64> {
        vec![-10.0, 0.0, 10.0, 20.0, 30.0]
    }

    fn lons() -> Vec<f64> {
        (0..36).map(|i| i as f64 * 10.0).collect()
    }

    /// time x lat x lon with f = time + lat/100 + lon/1000
    fn field() -> GriddedField {
        let (lats, lons) = (lats(), lons());
        let values = ArrayD::from_shape_fn(IxDyn(&[3, lats.len(), lons.len()]), |idx| {
            idx[0] as f64 + lats[idx[1]] / 100.0 + lons[idx[2]] / 1000.0
        });
        GriddedField::new(
            values,
            vec![
                Coordinate::pentads(3),
                Coordinate::latitude(lats),
                Coordinate::longitude(lons),
            ],
        )
        .unwrap()
    }

    fn cos_mean(field: &GriddedField, t: usize, lat_idx: &[usize], lon_idx: &[usize]) -> f64 {
        let lats = lats();
        let mut total = 0.0;
        let mut weight = 0.0;
        for &i in lat_idx {
            let c = lats[i].to_radians().cos();
            let zonal: f64 = lon_idx
                .iter()
                .map(|&j| field.values()[[t, i, j]])
                .sum::<f64>()
                / lon_idx.len() as f64;
            total += zonal * c;
            weight += c;
        }
        total / weight
    }

    #[test]
    fn cosine_weighting_matches_formula() {
        let field = field();
        let region = RegionBox::new([0.0, 20.0], [100.0, 120.0]);
        let result = area_mean(&field, &region, None).unwrap();
        assert!(!result.has_notices());
        assert_eq!(result.value.shape(), &[3]);
        for t in 0..3 {
            assert_relative_eq!(
                result.value.values()[[t]],
                cos_mean(&field, t, &[1, 2, 3], &[10, 11, 12]),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn cosine_shaped_areas_agree_with_fallback() {
        let field = field();
        let areas = ArrayD::from_shape_fn(IxDyn(&[5, 36]), |idx| {
            lats()[idx[0]].to_radians().cos() * 1.5e10
        });
        let area = CellAreaGrid::new(
            &GriddedField::new(
                areas,
                vec![Coordinate::latitude(lats()), Coordinate::longitude(lons())],
            )
            .unwrap(),
        )
        .unwrap();
        let region = RegionBox::new([-10.0, 30.0], [50.0, 200.0]);

        let weighted = area_mean(&field, &region, Some(&area)).unwrap();
        let fallback = area_mean(&field, &region, None).unwrap();
        assert!(!weighted.has_notices());
        for t in 0..3 {
            assert_relative_eq!(
                weighted.value.values()[[t]],
                fallback.value.values()[[t]],
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn area_grid_axis_order_is_irrelevant() {
        let field = field();
        let areas = ArrayD::from_shape_fn(IxDyn(&[36, 5]), |idx| 1.0 + idx[0] as f64);
        let area = CellAreaGrid::new(
            &GriddedField::new(
                areas,
                vec![Coordinate::longitude(lons()), Coordinate::latitude(lats())],
            )
            .unwrap(),
        )
        .unwrap();
        assert_eq!(area.areas().dim(), (5, 36));
        assert_eq!(area.areas()[[0, 3]], 4.0);
        let region = RegionBox::new([0.0, 0.0], [0.0, 10.0]);
        let result = area_mean(&field, &region, Some(&area)).unwrap();
        let expected = (1.0 * field.values()[[0, 1, 0]] + 2.0 * field.values()[[0, 1, 1]]) / 3.0;
        assert_relative_eq!(result.value.values()[[0]], expected, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_areas_fall_back_with_notice() {
        let field = field();
        let area = CellAreaGrid::new(
            &GriddedField::new(
                ArrayD::from_elem(IxDyn(&[2, 36]), 1.0),
                vec![Coordinate::latitude(vec![0.0, 10.0]), Coordinate::longitude(lons())],
            )
            .unwrap(),
        )
        .unwrap();
        let region = RegionBox::new([0.0, 20.0], [100.0, 120.0]);
        let result = area_mean(&field, &region, Some(&area)).unwrap();
        let fallback = area_mean(&field, &region, None).unwrap();

        assert_eq!(result.notices.len(), 1);
        assert!(matches!(result.notices[0], Notice::AreaWeightsRejected { .. }));
        assert_eq!(result.value, fallback.value);
    }

    #[test]
    fn shifted_area_coordinates_are_rejected() {
        let field = field();
        let shifted: Vec<f64> = lats().iter().map(|l| l + 0.5).collect();
        let area = CellAreaGrid::new(
            &GriddedField::new(
                ArrayD::from_elem(IxDyn(&[5, 36]), 1.0),
                vec![Coordinate::latitude(shifted), Coordinate::longitude(lons())],
            )
            .unwrap(),
        )
        .unwrap();
        let result = area_mean(&field, &RegionBox::new([0.0, 10.0], [0.0, 50.0]), Some(&area))
            .unwrap();
        assert!(result.has_notices());
    }

    #[test]
    fn wrapped_box_selects_both_sides() {
        let field = field();
        let region = RegionBox::new([0.0, 0.0], [350.0, 10.0]);
        let result = area_mean(&field, &region, None).unwrap();
        // lon 0, 10 and 350 only
        let expected = cos_mean(&field, 2, &[1], &[0, 1, 35]);
        assert_relative_eq!(result.value.values()[[2]], expected, epsilon = 1e-12);
        assert_relative_eq!(expected, 2.0 + (0.0 + 0.01 + 0.35) / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_region_is_nan() {
        let field = field();
        let region = RegionBox::new([60.0, 70.0], [0.0, 50.0]);
        let result = area_mean(&field, &region, None).unwrap();
        assert!(result.value.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn difference_of_two_boxes() {
        let field = field();
        let north = RegionBox::new([20.0, 30.0], [100.0, 100.0]);
        let south = RegionBox::new([-10.0, -10.0], [100.0, 100.0]);
        let result = area_mean_difference(&field, &north, Some(&south), None).unwrap();
        let north_mean = area_mean(&field, &north, None).unwrap().value;
        for t in 0..3 {
            assert_relative_eq!(
                result.value.values()[[t]],
                north_mean.values()[[t]] - (t as f64 - 0.1 + 0.1),
                epsilon = 1e-12
            );
        }

        let single = area_mean_difference(&field, &north, None, None).unwrap();
        assert_eq!(single.value, north_mean);
    }

    #[test]
    fn region_spec_follows_field_longitudes() {
        let lons: Vec<f64> = (0..36).map(|i| -180.0 + i as f64 * 10.0).collect();
        let values = ArrayD::from_shape_fn(IxDyn(&[2, 36]), |idx| lons[idx[1]]);
        let field = GriddedField::new(
            values,
            vec![Coordinate::latitude(vec![0.0, 10.0]), Coordinate::longitude(lons.clone())],
        )
        .unwrap();
        let spec = RegionSpec::single(RegionBox::new([0.0, 10.0], [230.0, 250.0]), LongitudeShift::Both);
        let result = reduce_region(&field, &spec, None).unwrap();
        assert_relative_eq!(result.value.scalar().unwrap(), -120.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_fields_without_spatial_axes() {
        let field = GriddedField::new(
            ArrayD::zeros(IxDyn(&[3])),
            vec![Coordinate::pentads(3)],
        )
        .unwrap();
        assert!(matches!(
            area_mean(&field, &RegionBox::new([0.0, 1.0], [0.0, 1.0]), None),
            Err(MonsoonError::MissingAxis(AxisKind::Latitude))
        ));
    }
}
