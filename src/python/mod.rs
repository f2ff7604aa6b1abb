use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pymodule;

use monsoon_core::onset::{self, ThresholdMode};
use monsoon_core::reduce::reduce_region;
use monsoon_core::region::RegionSpec;
use monsoon_core::smoothing;
use monsoon_core::AxisKind;
use monsoon_indices::suite::IndexSuite;
use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyReadonlyArrayDyn};

mod arrays;
mod builders;

use arrays::{
    cell_areas, diagnosed_array, season_arrays, series_field, spatial_field, to_array,
    value_error, PyField,
};
use builders::indices;

/// Keep the mean and lowest 12 harmonics of every series along `axis`
#[pyfunction]
#[pyo3(signature = (values, axis=-1))]
fn smooth_harmonics<'py>(
    py: Python<'py>,
    values: PyReadonlyArrayDyn<'py, f64>,
    axis: isize,
) -> PyResult<PyField<'py>> {
    let field = series_field(values, axis)?;
    let smooth = smoothing::smooth_harmonics(&field, AxisKind::Time).map_err(value_error)?;
    Ok(to_array(py, smooth))
}

/// Onset, withdrawal, peak and duration of the season along `axis`
#[pyfunction]
#[pyo3(signature = (values, threshold, axis=-1, normalise=false))]
fn detect_season<'py>(
    py: Python<'py>,
    values: PyReadonlyArrayDyn<'py, f64>,
    threshold: f64,
    axis: isize,
    normalise: bool,
) -> PyResult<(PyField<'py>, PyField<'py>, PyField<'py>, PyField<'py>)> {
    let field = series_field(values, axis)?;
    let mode = if normalise {
        ThresholdMode::Normalised
    } else {
        ThresholdMode::Absolute
    };
    let record =
        onset::detect_season(&field, AxisKind::Time, threshold, mode).map_err(value_error)?;
    Ok(season_arrays(py, record))
}

/// Area-weighted mean over a region given as a dict, e.g. `{"primary": {...}}`
#[pyfunction]
#[pyo3(signature = (
    values, lat, lon, lat_axis, lon_axis, region, area=None, area_lat=None, area_lon=None
))]
#[allow(clippy::too_many_arguments)]
fn regional_mean<'py>(
    py: Python<'py>,
    values: PyReadonlyArrayDyn<'py, f64>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    lat_axis: isize,
    lon_axis: isize,
    region: Bound<'py, PyAny>,
    area: Option<PyReadonlyArray2<'py, f64>>,
    area_lat: Option<PyReadonlyArray1<'py, f64>>,
    area_lon: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<(PyField<'py>, Vec<String>)> {
    let region = pythonize::depythonize_bound::<RegionSpec>(region)
        .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
    let field = spatial_field(values, lat, lon, lat_axis, lon_axis)?;
    let area = cell_areas(area, area_lat, area_lon, &field)?;
    let mean = reduce_region(&field, &region, area.as_ref()).map_err(value_error)?;
    Ok(diagnosed_array(py, mean))
}

/// Evaluate a TOML-declared suite of regional indices
///
/// Returns `(name, values, messages)` per index. A failed index has no values and its
/// error as the only message.
#[pyfunction]
#[pyo3(signature = (
    config, values, lat, lon, lat_axis, lon_axis, area=None, area_lat=None, area_lon=None
))]
#[allow(clippy::too_many_arguments)]
fn evaluate_suite<'py>(
    py: Python<'py>,
    config: String,
    values: PyReadonlyArrayDyn<'py, f64>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    lat_axis: isize,
    lon_axis: isize,
    area: Option<PyReadonlyArray2<'py, f64>>,
    area_lat: Option<PyReadonlyArray1<'py, f64>>,
    area_lon: Option<PyReadonlyArray1<'py, f64>>,
) -> PyResult<Vec<(String, Option<PyField<'py>>, Vec<String>)>> {
    let suite = IndexSuite::from_toml(&config).map_err(value_error)?;
    let field = spatial_field(values, lat, lon, lat_axis, lon_axis)?;
    let area = cell_areas(area, area_lat, area_lon, &field)?;

    Ok(suite
        .evaluate(&field, area.as_ref())
        .into_iter()
        .map(|(name, result)| match result {
            Ok(diagnosed) => {
                let (values, messages) = diagnosed_array(py, diagnosed);
                (name, Some(values), messages)
            }
            Err(e) => (name, None, vec![e.to_string()]),
        })
        .collect())
}

#[pymodule]
#[pyo3(name = "_lib")]
fn monsoon(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(smooth_harmonics, m)?)?;
    m.add_function(wrap_pyfunction!(detect_season, m)?)?;
    m.add_function(wrap_pyfunction!(regional_mean, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_suite, m)?)?;
    m.add_wrapped(wrap_pymodule!(indices))?;

    set_path(m, "monsoon._lib.indices", "indices")?;
    Ok(())
}

fn set_path(m: &Bound<'_, PyModule>, path: &str, module: &str) -> PyResult<()> {
    let code = format!(
        "\
import sys
sys.modules['{path}'] = {module}
    "
    );
    m.py().run_bound(&code, None, Some(&m.dict()))
}
