//! Steps shared by the index routines

use monsoon_core::errors::{MonsoonError, MonsoonResult};
use monsoon_core::levels::{select_level, LevelSelection, LevelSlice};
use monsoon_core::{AxisKind, GriddedField, Notice};

/// Extract the configured pressure level, moving any notice into `notices`
pub(crate) fn at_level(
    field: &GriddedField,
    selection: &LevelSelection,
    notices: &mut Vec<Notice>,
) -> MonsoonResult<LevelSlice> {
    Ok(select_level(field, selection)?.drain_into(notices))
}

/// Pressure (Pa) of a level slice, falling back to the requested level
pub(crate) fn pressure_pa(slice: &LevelSlice, selection: &LevelSelection) -> f64 {
    slice
        .pressure_pa()
        .unwrap_or(selection.level_hpa * 100.0)
}

/// Values and time coordinates of a field that only has a time axis left
pub(crate) fn time_series(field: &GriddedField) -> MonsoonResult<(Vec<f64>, Vec<f64>)> {
    let (_, time) = field.require(AxisKind::Time)?;
    if field.ndim() != 1 {
        let axes: Vec<String> = field.coords().iter().map(|c| c.name.clone()).collect();
        return Err(MonsoonError::Error(format!(
            "Expected a single time series after averaging, found axes {:?}",
            axes
        )));
    }
    Ok((field.values().iter().copied().collect(), time.values.clone()))
}
