//! Core primitives for monsoon diagnostics
//!
//! Every published monsoon index is built from a handful of transforms over labeled
//! latitude/longitude(/level/time) arrays:
//!
//! - [`reduce`]: area-weighted regional means, singly or as the difference of two boxes
//! - [`smoothing`]: harmonic smoothing of a seasonal cycle
//! - [`onset`]: threshold edge detection yielding onset, withdrawal, peak and duration
//! - [`rotation`]: the sustained-condition and curvature search used for wind-rotation onsets
//!
//! Supporting modules provide the labeled array type ([`grid`]), coordinate lookups
//! ([`axis`]), region boxes ([`region`]), pressure-level selection ([`levels`]) and
//! moist thermodynamics ([`thermo`]).

pub mod axis;
pub mod errors;
pub mod gradient;
pub mod grid;
pub mod levels;
pub mod notice;
pub mod onset;
pub mod reduce;
pub mod region;
pub mod rotation;
pub mod smoothing;
pub mod thermo;

pub use grid::{AxisKind, AxisNames, CellSeries, Coordinate, GriddedField};
pub use notice::{Diagnosed, Notice};
