//! Conversions between numpy arrays and labeled fields

use monsoon_core::errors::{MonsoonError, MonsoonResult};
use monsoon_core::onset::SeasonRecord;
use monsoon_core::reduce::CellAreaGrid;
use monsoon_core::{AxisKind, Coordinate, Diagnosed, GriddedField};
use ndarray::ArrayView2;
use numpy::{IntoPyArray, PyArrayDyn, PyReadonlyArray1, PyReadonlyArray2, PyReadonlyArrayDyn};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub type PyField<'py> = Bound<'py, PyArrayDyn<f64>>;

pub fn value_error(e: MonsoonError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Resolve a possibly negative numpy axis
pub fn axis_index(axis: isize, ndim: usize) -> PyResult<usize> {
    let resolved = if axis < 0 { axis + ndim as isize } else { axis };
    if resolved < 0 || resolved >= ndim as isize {
        return Err(PyValueError::new_err(format!(
            "axis {} is out of bounds for an array with {} dimensions",
            axis, ndim
        )));
    }
    Ok(resolved as usize)
}

/// Label an array, filling unlabeled axes with index coordinates of the `spare` kinds
fn label(
    values: PyReadonlyArrayDyn<'_, f64>,
    fixed: Vec<(usize, Coordinate)>,
    spare: &[AxisKind],
) -> PyResult<GriddedField> {
    let values = values.as_array().to_owned();
    let shape = values.shape().to_vec();
    let mut spare = spare
        .iter()
        .filter(|&&kind| fixed.iter().all(|(_, c)| c.kind != kind));

    let coords = (0..shape.len())
        .map(|axis| {
            if let Some((_, coord)) = fixed.iter().find(|(a, _)| *a == axis) {
                return Ok(coord.clone());
            }
            let kind = spare.next().ok_or_else(|| {
                PyValueError::new_err(format!(
                    "Too many dimensions: {} given, axis {} has no role",
                    shape.len(),
                    axis
                ))
            })?;
            Ok(Coordinate::new(
                &format!("dim_{}", axis),
                *kind,
                (0..shape[axis]).map(|i| i as f64).collect(),
            ))
        })
        .collect::<PyResult<Vec<_>>>()?;
    GriddedField::new(values, coords).map_err(value_error)
}

/// An array whose cyclical axis is `axis`; the other axes only group cells
pub fn series_field(values: PyReadonlyArrayDyn<'_, f64>, axis: isize) -> PyResult<GriddedField> {
    let shape = values.as_array().shape().to_vec();
    let axis = axis_index(axis, shape.len())?;
    let len = shape[axis];
    label(
        values,
        vec![(axis, Coordinate::pentads(len))],
        &[AxisKind::Latitude, AxisKind::Longitude, AxisKind::Level],
    )
}

/// An array with latitude and longitude axes, plus at most a time axis
pub fn spatial_field(
    values: PyReadonlyArrayDyn<'_, f64>,
    lat: PyReadonlyArray1<'_, f64>,
    lon: PyReadonlyArray1<'_, f64>,
    lat_axis: isize,
    lon_axis: isize,
) -> PyResult<GriddedField> {
    let ndim = values.as_array().ndim();
    label(
        values,
        vec![
            (
                axis_index(lat_axis, ndim)?,
                Coordinate::latitude(lat.as_array().to_vec()),
            ),
            (
                axis_index(lon_axis, ndim)?,
                Coordinate::longitude(lon.as_array().to_vec()),
            ),
        ],
        &[AxisKind::Time],
    )
}

/// Cell areas given as latitude x longitude
///
/// The area grid takes its coordinates from `area_lat` and `area_lon`. An axis given
/// without coordinates borrows the field's when the lengths agree. Areas that do not
/// fit the field are kept so the reducer can fall back to cosine weights with a notice.
pub fn area_grid(
    area: ArrayView2<'_, f64>,
    area_lat: Option<Vec<f64>>,
    area_lon: Option<Vec<f64>>,
    field: &GriddedField,
) -> MonsoonResult<CellAreaGrid> {
    let (_, lat) = field.require(AxisKind::Latitude)?;
    let (_, lon) = field.require(AxisKind::Longitude)?;
    let (nlat, nlon) = area.dim();
    let resolve = |given: Option<Vec<f64>>, own: &Coordinate, len: usize| {
        given.unwrap_or_else(|| {
            if own.len() == len {
                own.values.clone()
            } else {
                (0..len).map(|i| i as f64).collect()
            }
        })
    };
    let areas = GriddedField::new(
        area.to_owned().into_dyn(),
        vec![
            Coordinate::latitude(resolve(area_lat, lat, nlat)),
            Coordinate::longitude(resolve(area_lon, lon, nlon)),
        ],
    )?;
    CellAreaGrid::new(&areas)
}

pub fn cell_areas(
    area: Option<PyReadonlyArray2<'_, f64>>,
    area_lat: Option<PyReadonlyArray1<'_, f64>>,
    area_lon: Option<PyReadonlyArray1<'_, f64>>,
    field: &GriddedField,
) -> PyResult<Option<CellAreaGrid>> {
    let Some(area) = area else {
        return Ok(None);
    };
    area_grid(
        area.as_array(),
        area_lat.map(|c| c.as_array().to_vec()),
        area_lon.map(|c| c.as_array().to_vec()),
        field,
    )
    .map(Some)
    .map_err(value_error)
}

pub fn to_array(py: Python<'_>, field: GriddedField) -> PyField<'_> {
    field.into_values().into_pyarray_bound(py)
}

/// Values with their notices rendered as messages
pub fn diagnosed_array(
    py: Python<'_>,
    diagnosed: Diagnosed<GriddedField>,
) -> (PyField<'_>, Vec<String>) {
    let (field, notices) = diagnosed.into_parts();
    (
        to_array(py, field),
        notices.iter().map(|n| n.to_string()).collect(),
    )
}

/// (onset, withdrawal, peak, duration)
pub fn season_arrays(
    py: Python<'_>,
    record: SeasonRecord,
) -> (PyField<'_>, PyField<'_>, PyField<'_>, PyField<'_>) {
    (
        to_array(py, record.onset),
        to_array(py, record.withdrawal),
        to_array(py, record.peak),
        to_array(py, record.duration),
    )
}
