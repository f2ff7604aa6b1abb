//! Python builders for the regional indices

use crate::python::arrays::{cell_areas, diagnosed_array, spatial_field, value_error, PyField};
use monsoon_indices::parameters::{
    WangFanParameters, YimPrecipitationParameters, YimVorticityParameters,
};
use monsoon_indices::precipitation::YimPrecipitation;
use monsoon_indices::shear::{WangFan, YimVorticity};
use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyReadonlyArrayDyn};
use pyo3::prelude::*;

/// Expose a regional index to python, configurable from a dict of parameters
macro_rules! create_index_builder {
    ($builder_name:ident, $index:ty, $index_parameters:ty) => {
        #[pyclass(module = "monsoon._lib.indices")]
        pub struct $builder_name {
            index: $index,
        }

        #[pymethods]
        impl $builder_name {
            #[new]
            pub fn new() -> Self {
                Self {
                    index: <$index>::default(),
                }
            }

            #[staticmethod]
            pub fn from_parameters(parameters: Bound<PyAny>) -> PyResult<Self> {
                use pyo3::exceptions::PyValueError;

                let parameters = pythonize::depythonize_bound::<$index_parameters>(parameters);
                match parameters {
                    Ok(parameters) => Ok(Self {
                        index: <$index>::from_parameters(parameters),
                    }),
                    Err(e) => Err(PyValueError::new_err(format!("{}", e))),
                }
            }

            pub fn parameters(&self, py: Python<'_>) -> PyResult<PyObject> {
                Ok(pythonize::pythonize(py, self.index.parameters())?)
            }

            /// Returns the index values and any notices raised while computing them
            #[pyo3(signature = (
                values, lat, lon, lat_axis, lon_axis, area=None, area_lat=None, area_lon=None
            ))]
            #[allow(clippy::too_many_arguments)]
            pub fn calculate<'py>(
                &self,
                py: Python<'py>,
                values: PyReadonlyArrayDyn<'py, f64>,
                lat: PyReadonlyArray1<'py, f64>,
                lon: PyReadonlyArray1<'py, f64>,
                lat_axis: isize,
                lon_axis: isize,
                area: Option<PyReadonlyArray2<'py, f64>>,
                area_lat: Option<PyReadonlyArray1<'py, f64>>,
                area_lon: Option<PyReadonlyArray1<'py, f64>>,
            ) -> PyResult<(PyField<'py>, Vec<String>)> {
                let field = spatial_field(values, lat, lon, lat_axis, lon_axis)?;
                let area = cell_areas(area, area_lat, area_lon, &field)?;
                let result = self
                    .index
                    .calculate(&field, area.as_ref())
                    .map_err(value_error)?;
                Ok(diagnosed_array(py, result))
            }
        }
    };
}

create_index_builder!(WangFanIndex, WangFan, WangFanParameters);
create_index_builder!(YimVorticityIndex, YimVorticity, YimVorticityParameters);
create_index_builder!(
    YimPrecipitationIndex,
    YimPrecipitation,
    YimPrecipitationParameters
);

#[pymodule]
pub fn indices(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<WangFanIndex>()?;
    m.add_class::<YimVorticityIndex>()?;
    m.add_class::<YimPrecipitationIndex>()?;
    Ok(())
}
