use crate::grid::AxisKind;
use thiserror::Error;

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum MonsoonError {
    #[error("{0}")]
    Error(String),
    #[error("Field has no {0} axis")]
    MissingAxis(AxisKind),
    #[error("Field has more than one {0} axis")]
    DuplicateAxis(AxisKind),
    #[error("Array has {ndim} dimensions but {coords} coordinates were supplied")]
    DimensionMismatch { ndim: usize, coords: usize },
    #[error("Coordinate '{name}' has {coords} values but array axis {axis} has length {len}")]
    AxisLengthMismatch {
        name: String,
        axis: usize,
        coords: usize,
        len: usize,
    },
    #[error("Axis '{0}' has no coordinate values")]
    EmptyAxis(String),
    #[error("Index {index} is out of bounds for axis '{axis}' of length {len}")]
    IndexOutOfBounds {
        axis: String,
        index: usize,
        len: usize,
    },
    #[error("Fields are not aligned: {0}")]
    Misaligned(String),
    #[error("Pressure unit '{0}' not recognised, expected 'Pa' or 'hPa'")]
    UnrecognisedPressureUnit(String),
    #[error("Time axis is not datetime indexable")]
    NonCalendarTimeAxis,
    #[error("Unknown region '{0}'")]
    UnknownRegion(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

/// Convenience type for `Result<T, MonsoonError>`.
pub type MonsoonResult<T> = Result<T, MonsoonError>;
