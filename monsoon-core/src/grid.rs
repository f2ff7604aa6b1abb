//! Labeled gridded fields
//!
//! A [`GriddedField`] couples an N-dimensional [`ndarray`] array with one [`Coordinate`]
//! per axis. Axes are identified by [`AxisKind`] rather than by position, so callers can
//! hand over data in whatever axis order their source files use.
//!
//! # Examples
//!
//! ```rust
//! use monsoon_core::grid::{AxisKind, Coordinate, GriddedField};
//! use ndarray::{ArrayD, IxDyn};
//!
//! let values = ArrayD::from_shape_vec(IxDyn(&[2, 3]), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let field = GriddedField::new(
//!     values,
//!     vec![
//!         Coordinate::latitude(vec![0.0, 10.0]),
//!         Coordinate::longitude(vec![100.0, 110.0, 120.0]),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(field.axis_of(AxisKind::Longitude), Some(1));
//! assert!(field.coord(AxisKind::Time).is_none());
//! ```

use crate::axis::coordinates_agree;
use crate::errors::{MonsoonError, MonsoonResult};
use chrono::{Datelike, NaiveDate};
use ndarray::{Array2, Array3, ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Physical meaning of an array axis
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    /// Latitude in degrees north
    Latitude,
    /// Longitude in degrees east, either 0..360 or -180..180
    Longitude,
    /// Pressure level, in Pa or hPa
    Level,
    /// Time, either pentad/month numbers or calendar steps
    Time,
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisKind::Latitude => write!(f, "latitude"),
            AxisKind::Longitude => write!(f, "longitude"),
            AxisKind::Level => write!(f, "level"),
            AxisKind::Time => write!(f, "time"),
        }
    }
}

/// Coordinate values labelling one axis of a field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Dimension name as it appeared in the source data
    pub name: String,
    pub kind: AxisKind,
    pub values: Vec<f64>,
}

impl Coordinate {
    pub fn new(name: &str, kind: AxisKind, values: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            values,
        }
    }

    pub fn latitude(values: Vec<f64>) -> Self {
        Self::new("lat", AxisKind::Latitude, values)
    }

    pub fn longitude(values: Vec<f64>) -> Self {
        Self::new("lon", AxisKind::Longitude, values)
    }

    pub fn level(values: Vec<f64>) -> Self {
        Self::new("plev", AxisKind::Level, values)
    }

    pub fn time(values: Vec<f64>) -> Self {
        Self::new("time", AxisKind::Time, values)
    }

    /// Pentads numbered 1..=n
    pub fn pentads(n: usize) -> Self {
        Self::new("pentad", AxisKind::Time, (1..=n).map(|p| p as f64).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest coordinate value, NaN for an empty axis
    pub fn min(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub(crate) fn select(&self, indices: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            values: indices.iter().map(|&i| self.values[i]).collect(),
        }
    }

    fn agrees_with(&self, other: &Coordinate) -> bool {
        self.kind == other.kind && coordinates_agree(&self.values, &other.values)
    }
}

/// Dimension names used to recognise each axis kind in caller data
///
/// Defaults follow CMIP conventions: `lat`, `lon`, `plev` and `time`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisNames {
    pub latitude: String,
    pub longitude: String,
    pub level: String,
    pub time: String,
}

impl Default for AxisNames {
    fn default() -> Self {
        Self {
            latitude: "lat".to_string(),
            longitude: "lon".to_string(),
            level: "plev".to_string(),
            time: "time".to_string(),
        }
    }
}

impl AxisNames {
    /// Axis kind for a dimension name, if it is one of the configured names
    pub fn kind_of(&self, name: &str) -> Option<AxisKind> {
        if name == self.latitude {
            Some(AxisKind::Latitude)
        } else if name == self.longitude {
            Some(AxisKind::Longitude)
        } else if name == self.level {
            Some(AxisKind::Level)
        } else if name == self.time {
            Some(AxisKind::Time)
        } else {
            None
        }
    }
}

/// An N-dimensional array with labeled latitude, longitude, level and time axes
///
/// Each axis kind appears at most once. When the field has a time axis it may also
/// carry a calendar: one date per time step, needed by indices that select months.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GriddedField {
    values: ArrayD<f64>,
    coords: Vec<Coordinate>,
    calendar: Option<Vec<NaiveDate>>,
}

impl GriddedField {
    /// Create a field, checking that coordinates match the array shape
    pub fn new(values: ArrayD<f64>, coords: Vec<Coordinate>) -> MonsoonResult<Self> {
        if coords.len() != values.ndim() {
            return Err(MonsoonError::DimensionMismatch {
                ndim: values.ndim(),
                coords: coords.len(),
            });
        }
        for (axis, (coord, &len)) in coords.iter().zip(values.shape()).enumerate() {
            if coord.len() != len {
                return Err(MonsoonError::AxisLengthMismatch {
                    name: coord.name.clone(),
                    axis,
                    coords: coord.len(),
                    len,
                });
            }
        }
        for (i, coord) in coords.iter().enumerate() {
            if coords[..i].iter().any(|c| c.kind == coord.kind) {
                return Err(MonsoonError::DuplicateAxis(coord.kind));
            }
        }
        Ok(Self {
            values,
            coords,
            calendar: None,
        })
    }

    /// Create a field from caller dimension names
    ///
    /// `dims` lists the dimension names in array axis order. Coordinates missing from
    /// `coords` are numbered from zero, except time, which is numbered from one.
    pub fn from_named(
        values: ArrayD<f64>,
        dims: &[String],
        coords: &HashMap<String, Vec<f64>>,
        names: &AxisNames,
    ) -> MonsoonResult<Self> {
        if dims.len() != values.ndim() {
            return Err(MonsoonError::DimensionMismatch {
                ndim: values.ndim(),
                coords: dims.len(),
            });
        }
        let labelled = dims
            .iter()
            .zip(values.shape())
            .map(|(name, &len)| {
                let kind = names.kind_of(name).ok_or_else(|| {
                    MonsoonError::Error(format!(
                        "Dimension '{}' is not a latitude, longitude, level or time axis",
                        name
                    ))
                })?;
                let values = match coords.get(name) {
                    Some(values) => values.clone(),
                    None if kind == AxisKind::Time => (1..=len).map(|i| i as f64).collect(),
                    None => (0..len).map(|i| i as f64).collect(),
                };
                Ok(Coordinate::new(name, kind, values))
            })
            .collect::<MonsoonResult<Vec<_>>>()?;
        Self::new(values, labelled)
    }

    /// Attach calendar dates to the time axis
    pub fn with_calendar(mut self, dates: Vec<NaiveDate>) -> MonsoonResult<Self> {
        let (_, time) = self.require(AxisKind::Time)?;
        if time.len() != dates.len() {
            return Err(MonsoonError::Misaligned(format!(
                "calendar has {} dates but the time axis has {} steps",
                dates.len(),
                time.len()
            )));
        }
        self.calendar = Some(dates);
        Ok(self)
    }

    pub(crate) fn from_parts(
        values: ArrayD<f64>,
        coords: Vec<Coordinate>,
        calendar: Option<Vec<NaiveDate>>,
    ) -> MonsoonResult<Self> {
        let has_time = coords.iter().any(|c| c.kind == AxisKind::Time);
        let field = Self::new(values, coords)?;
        match calendar {
            Some(dates) if has_time => field.with_calendar(dates),
            _ => Ok(field),
        }
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn into_values(self) -> ArrayD<f64> {
        self.values
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    pub fn ndim(&self) -> usize {
        self.values.ndim()
    }

    /// The single value of a field holding exactly one value, e.g. a full spatial reduction
    pub fn scalar(&self) -> Option<f64> {
        if self.values.len() == 1 {
            self.values.iter().next().copied()
        } else {
            None
        }
    }

    pub fn calendar(&self) -> Option<&[NaiveDate]> {
        self.calendar.as_deref()
    }

    /// Array axis position of an axis kind
    pub fn axis_of(&self, kind: AxisKind) -> Option<usize> {
        self.coords.iter().position(|c| c.kind == kind)
    }

    pub fn coord(&self, kind: AxisKind) -> Option<&Coordinate> {
        self.coords.iter().find(|c| c.kind == kind)
    }

    /// Axis position and coordinate of an axis kind, or [`MonsoonError::MissingAxis`]
    pub fn require(&self, kind: AxisKind) -> MonsoonResult<(usize, &Coordinate)> {
        self.coords
            .iter()
            .enumerate()
            .find(|(_, c)| c.kind == kind)
            .ok_or(MonsoonError::MissingAxis(kind))
    }

    /// Calendar month (1-12) of each time step
    pub fn months(&self) -> MonsoonResult<Vec<u32>> {
        self.calendar
            .as_ref()
            .map(|dates| dates.iter().map(|d| d.month()).collect())
            .ok_or(MonsoonError::NonCalendarTimeAxis)
    }

    /// Keep only the given positions along an axis
    pub fn select(&self, kind: AxisKind, indices: &[usize]) -> MonsoonResult<Self> {
        let (axis, coord) = self.require(kind)?;
        if let Some(&index) = indices.iter().find(|&&i| i >= coord.len()) {
            return Err(MonsoonError::IndexOutOfBounds {
                axis: coord.name.clone(),
                index,
                len: coord.len(),
            });
        }
        let mut coords = self.coords.clone();
        coords[axis] = coord.select(indices);
        let calendar = match (&self.calendar, kind) {
            (Some(dates), AxisKind::Time) => Some(indices.iter().map(|&i| dates[i]).collect()),
            (calendar, _) => calendar.clone(),
        };
        Ok(Self {
            values: self.values.select(Axis(axis), indices),
            coords,
            calendar,
        })
    }

    /// Take a single position along an axis, removing that axis
    pub fn index_axis(&self, kind: AxisKind, index: usize) -> MonsoonResult<Self> {
        let (axis, coord) = self.require(kind)?;
        if index >= coord.len() {
            return Err(MonsoonError::IndexOutOfBounds {
                axis: coord.name.clone(),
                index,
                len: coord.len(),
            });
        }
        let mut coords = self.coords.clone();
        coords.remove(axis);
        let calendar = if kind == AxisKind::Time {
            None
        } else {
            self.calendar.clone()
        };
        Ok(Self {
            values: self.values.index_axis(Axis(axis), index).to_owned(),
            coords,
            calendar,
        })
    }

    /// Apply a function to every value
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            values: self.values.mapv(f),
            coords: self.coords.clone(),
            calendar: self.calendar.clone(),
        }
    }

    /// Combine two fields on the same grid value by value
    pub fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> MonsoonResult<Self> {
        self.check_aligned(other)?;
        let mut values = self.values.clone();
        values.zip_mut_with(&other.values, |a, &b| *a = f(*a, b));
        Ok(Self {
            values,
            coords: self.coords.clone(),
            calendar: self.calendar.clone(),
        })
    }

    /// Subtract a reference field defined on every axis except `kind`
    ///
    /// The reference is broadcast along `kind`, e.g. a lat-lon monthly mean removed
    /// from every pentad of a lat-lon-pentad field.
    pub fn subtract_along(&self, kind: AxisKind, reference: &Self) -> MonsoonResult<Self> {
        let cells = self.cells_along(kind)?;
        let expected = cells.cell_coords();
        let aligned = expected.len() == reference.coords.len()
            && expected
                .iter()
                .zip(&reference.coords)
                .all(|(a, b)| a.agrees_with(b));
        if !aligned {
            return Err(MonsoonError::Misaligned(format!(
                "reference must share every axis of the field except {}",
                kind
            )));
        }
        let offsets: Vec<f64> = reference.values.iter().copied().collect();
        let mut data = cells.data().clone();
        for (mut row, offset) in data.rows_mut().into_iter().zip(offsets) {
            row.mapv_inplace(|x| x - offset);
        }
        cells.with_data(data)?.into_field()
    }

    fn check_aligned(&self, other: &Self) -> MonsoonResult<()> {
        let aligned = self.shape() == other.shape()
            && self
                .coords
                .iter()
                .zip(&other.coords)
                .all(|(a, b)| a.agrees_with(b));
        if aligned {
            Ok(())
        } else {
            Err(MonsoonError::Misaligned(format!(
                "shapes {:?} and {:?} or their coordinates differ",
                self.shape(),
                other.shape()
            )))
        }
    }

    /// Rearrange the field into one series per grid cell along `kind`
    pub fn cells_along(&self, kind: AxisKind) -> MonsoonResult<CellSeries> {
        let (axis, coord) = self.require(kind)?;
        let mut order: Vec<usize> = (0..self.ndim()).filter(|&a| a != axis).collect();
        order.push(axis);

        let steps = coord.len();
        let n_cells: usize = order[..order.len() - 1]
            .iter()
            .map(|&a| self.shape()[a])
            .product();
        let data = self
            .values
            .clone()
            .permuted_axes(IxDyn(&order))
            .as_standard_layout()
            .into_owned()
            .into_shape((n_cells, steps))?;

        let cell_coords = order[..order.len() - 1]
            .iter()
            .map(|&a| self.coords[a].clone())
            .collect();
        let calendar = if kind == AxisKind::Time {
            self.calendar.clone()
        } else {
            None
        };
        Ok(CellSeries {
            data,
            axis: coord.clone(),
            cell_coords,
            order,
            calendar,
            cell_calendar: if kind == AxisKind::Time {
                None
            } else {
                self.calendar.clone()
            },
        })
    }

    /// Rearrange the field into (other axes x latitude x longitude) blocks
    pub fn spatial_blocks(&self) -> MonsoonResult<SpatialBlocks> {
        let (lat_axis, lat) = self.require(AxisKind::Latitude)?;
        let (lon_axis, lon) = self.require(AxisKind::Longitude)?;

        let rest: Vec<usize> = (0..self.ndim())
            .filter(|&a| a != lat_axis && a != lon_axis)
            .collect();
        let mut order = rest.clone();
        order.extend([lat_axis, lon_axis]);

        let n_rest: usize = rest.iter().map(|&a| self.shape()[a]).product();
        let blocks = self
            .values
            .clone()
            .permuted_axes(IxDyn(&order))
            .as_standard_layout()
            .into_owned()
            .into_shape((n_rest, lat.len(), lon.len()))?;

        Ok(SpatialBlocks {
            blocks,
            latitude: lat.clone(),
            longitude: lon.clone(),
            rest_coords: rest.iter().map(|&a| self.coords[a].clone()).collect(),
            calendar: self.calendar.clone(),
        })
    }
}

/// A field rearranged into one row per grid cell along a single axis
///
/// Rows follow row-major order over the remaining axes, which keep their original
/// relative order. [`CellSeries::into_field`] restores the original axis order.
#[derive(Clone, Debug)]
pub struct CellSeries {
    data: Array2<f64>,
    axis: Coordinate,
    cell_coords: Vec<Coordinate>,
    order: Vec<usize>,
    calendar: Option<Vec<NaiveDate>>,
    cell_calendar: Option<Vec<NaiveDate>>,
}

impl CellSeries {
    pub fn n_cells(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_steps(&self) -> usize {
        self.data.ncols()
    }

    /// Cells x steps
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Coordinate of the axis the series run along
    pub fn axis(&self) -> &Coordinate {
        &self.axis
    }

    pub fn cell_coords(&self) -> &[Coordinate] {
        &self.cell_coords
    }

    /// Series for one cell
    pub fn cell(&self, index: usize) -> Vec<f64> {
        self.data.row(index).to_vec()
    }

    /// Replace the data with an array of the same shape
    pub fn with_data(&self, data: Array2<f64>) -> MonsoonResult<Self> {
        if data.dim() != self.data.dim() {
            return Err(MonsoonError::Misaligned(format!(
                "expected {:?} cells x steps, got {:?}",
                self.data.dim(),
                data.dim()
            )));
        }
        Ok(Self {
            data,
            ..self.clone()
        })
    }

    /// Transform each cell's series, keeping its length
    pub fn map_cells(&self, f: impl Fn(&[f64]) -> Vec<f64>) -> MonsoonResult<Self> {
        let mut data = self.data.clone();
        for (i, mut row) in data.rows_mut().into_iter().enumerate() {
            let mapped = f(&self.cell(i));
            if mapped.len() != self.n_steps() {
                return Err(MonsoonError::Misaligned(format!(
                    "cell transform returned {} steps, expected {}",
                    mapped.len(),
                    self.n_steps()
                )));
            }
            row.assign(&ndarray::ArrayView1::from(&mapped));
        }
        self.with_data(data)
    }

    /// Reassemble a field in the original axis order
    pub fn into_field(self) -> MonsoonResult<GriddedField> {
        let mut shape: Vec<usize> = self.cell_coords.iter().map(|c| c.len()).collect();
        shape.push(self.axis.len());
        let permuted = self
            .data
            .as_standard_layout()
            .into_owned()
            .into_shape(IxDyn(&shape))?;

        let mut inverse = vec![0; self.order.len()];
        for (position, &axis) in self.order.iter().enumerate() {
            inverse[axis] = position;
        }
        let values = permuted
            .permuted_axes(IxDyn(&inverse))
            .as_standard_layout()
            .into_owned();

        let mut permuted_coords = self.cell_coords;
        permuted_coords.push(self.axis);
        let coords = inverse
            .iter()
            .map(|&position| permuted_coords[position].clone())
            .collect();
        let calendar = self.calendar.or(self.cell_calendar);
        GriddedField::from_parts(values, coords, calendar)
    }

    /// Build a field over the cell axes from one value per cell
    pub fn collapse(&self, values: Vec<f64>) -> MonsoonResult<GriddedField> {
        let shape: Vec<usize> = self.cell_coords.iter().map(|c| c.len()).collect();
        let values = ArrayD::from_shape_vec(IxDyn(&shape), values)?;
        GriddedField::from_parts(
            values,
            self.cell_coords.clone(),
            self.cell_calendar.clone(),
        )
    }
}

/// A field rearranged into latitude-longitude blocks, one per combination of the other axes
#[derive(Clone, Debug)]
pub struct SpatialBlocks {
    /// Other axes (flattened) x latitude x longitude
    pub blocks: Array3<f64>,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    /// Coordinates of the flattened other axes, in their original order
    pub rest_coords: Vec<Coordinate>,
    calendar: Option<Vec<NaiveDate>>,
}

impl SpatialBlocks {
    /// Build a field over the other axes, plus any trailing extra coordinates
    pub fn collapse(&self, values: Vec<f64>, extra: Vec<Coordinate>) -> MonsoonResult<GriddedField> {
        let mut coords = self.rest_coords.clone();
        coords.extend(extra);
        let shape: Vec<usize> = coords.iter().map(|c| c.len()).collect();
        let values = ArrayD::from_shape_vec(IxDyn(&shape), values)?;
        GriddedField::from_parts(values, coords, self.calendar.clone())
    }
}
