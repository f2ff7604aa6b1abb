//! Pressure-level selection
//!
//! Most circulation indices are defined at 850 hPa. Model output stores pressure in Pa
//! or hPa and does not always include the exact level, so selection falls back to the
//! nearest available level and reports the substitution as a [`Notice`].

use crate::axis::{find_within, nearest_index};
use crate::errors::{MonsoonError, MonsoonResult};
use crate::grid::{AxisKind, GriddedField};
use crate::notice::{Diagnosed, Notice};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Units of a pressure coordinate
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    #[default]
    Pa,
    #[serde(rename = "hPa")]
    HPa,
}

impl PressureUnit {
    /// Pa per unit
    pub fn to_pa(&self) -> f64 {
        match self {
            PressureUnit::Pa => 1.0,
            PressureUnit::HPa => 100.0,
        }
    }
}

impl FromStr for PressureUnit {
    type Err = MonsoonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pa" => Ok(PressureUnit::Pa),
            "hPa" => Ok(PressureUnit::HPa),
            other => Err(MonsoonError::UnrecognisedPressureUnit(other.to_string())),
        }
    }
}

/// Which pressure level to extract
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSelection {
    /// Requested level (hPa)
    pub level_hpa: f64,
    /// Units of the field's level coordinate
    pub unit: PressureUnit,
}

impl Default for LevelSelection {
    fn default() -> Self {
        Self {
            level_hpa: 850.0,
            unit: PressureUnit::Pa,
        }
    }
}

impl LevelSelection {
    /// Requested level expressed in the units of the level coordinate
    pub fn target(&self) -> f64 {
        self.level_hpa * 100.0 / self.unit.to_pa()
    }
}

/// A field with its level axis removed, and the level that was taken
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSlice {
    pub field: GriddedField,
    /// Chosen level in coordinate units, `None` when the field had no level axis
    pub level: Option<f64>,
    pub unit: PressureUnit,
}

impl LevelSlice {
    /// Chosen level in Pa
    pub fn pressure_pa(&self) -> Option<f64> {
        self.level.map(|level| level * self.unit.to_pa())
    }
}

/// Extract a single pressure level
///
/// Fields without a level axis are returned unchanged. An exact match (relative
/// tolerance 1e-6) removes the axis silently; otherwise the nearest level is taken and
/// [`Notice::NearestLevelSubstituted`] is attached.
pub fn select_level(
    field: &GriddedField,
    selection: &LevelSelection,
) -> MonsoonResult<Diagnosed<LevelSlice>> {
    let Some(coord) = field.coord(AxisKind::Level) else {
        return Ok(Diagnosed::clean(LevelSlice {
            field: field.clone(),
            level: None,
            unit: selection.unit,
        }));
    };

    let target = selection.target();
    let tolerance = 1e-6 * target.abs().max(1.0);
    let exact = find_within(&coord.values, target, tolerance);
    let index = exact
        .or_else(|| nearest_index(&coord.values, target))
        .ok_or_else(|| MonsoonError::EmptyAxis(coord.name.clone()))?;
    let found = coord.values[index];

    let slice = LevelSlice {
        field: field.index_axis(AxisKind::Level, index)?,
        level: Some(found),
        unit: selection.unit,
    };
    if exact.is_some() {
        return Ok(Diagnosed::clean(slice));
    }

    tracing::warn!(
        requested = target,
        found = found,
        "Exact pressure level not found, using nearest level"
    );
    Ok(Diagnosed::with_notices(
        slice,
        vec![Notice::NearestLevelSubstituted {
            requested: target,
            found,
        }],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;
    use ndarray::{ArrayD, IxDyn};

    fn levels_field(levels: Vec<f64>) -> GriddedField {
        let n = levels.len();
        let values = ArrayD::from_shape_fn(IxDyn(&[n, 2]), |idx| (idx[0] * 10 + idx[1]) as f64);
        GriddedField::new(
            values,
            vec![Coordinate::level(levels), Coordinate::latitude(vec![0.0, 10.0])],
        )
        .unwrap()
    }

    #[test]
    fn unit_parsing() {
        assert_eq!("Pa".parse::<PressureUnit>().unwrap(), PressureUnit::Pa);
        assert_eq!("hPa".parse::<PressureUnit>().unwrap(), PressureUnit::HPa);
        assert!(matches!(
            "mb".parse::<PressureUnit>(),
            Err(MonsoonError::UnrecognisedPressureUnit(unit)) if unit == "mb"
        ));
    }

    #[test]
    fn exact_level_is_clean() {
        let field = levels_field(vec![100000.0, 92500.0, 85000.0, 70000.0]);
        let result = select_level(&field, &LevelSelection::default()).unwrap();
        assert!(!result.has_notices());
        assert_eq!(result.value.level, Some(85000.0));
        assert_eq!(result.value.field.shape(), &[2]);
        assert_eq!(result.value.field.values()[[1]], 21.0);
    }

    #[test]
    fn hpa_coordinates() {
        let field = levels_field(vec![1000.0, 850.0, 500.0]);
        let selection = LevelSelection {
            unit: PressureUnit::HPa,
            ..LevelSelection::default()
        };
        let result = select_level(&field, &selection).unwrap();
        assert!(!result.has_notices());
        assert_eq!(result.value.pressure_pa(), Some(85000.0));
    }

    #[test]
    fn nearest_level_is_reported() {
        let field = levels_field(vec![100000.0, 80000.0, 50000.0]);
        let result = select_level(&field, &LevelSelection::default()).unwrap();
        assert_eq!(result.value.level, Some(80000.0));
        assert_eq!(
            result.notices,
            vec![Notice::NearestLevelSubstituted {
                requested: 85000.0,
                found: 80000.0
            }]
        );
    }

    #[test]
    fn no_level_axis_is_passed_through() {
        let field = GriddedField::new(
            ArrayD::zeros(IxDyn(&[2])),
            vec![Coordinate::latitude(vec![0.0, 1.0])],
        )
        .unwrap();
        let result = select_level(&field, &LevelSelection::default()).unwrap();
        assert_eq!(result.value.level, None);
        assert_eq!(result.value.field, field);
    }

    #[test]
    fn empty_level_axis_is_an_error() {
        let field = GriddedField::new(
            ArrayD::zeros(IxDyn(&[0, 2])),
            vec![Coordinate::level(vec![]), Coordinate::latitude(vec![0.0, 1.0])],
        )
        .unwrap();
        assert!(matches!(
            select_level(&field, &LevelSelection::default()),
            Err(MonsoonError::EmptyAxis(_))
        ));
    }
}
