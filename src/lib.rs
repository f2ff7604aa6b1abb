//! Monsoon indices for gridded atmospheric data
//!
//! The Rust API lives in the workspace crates, re-exported here:
//! - [`monsoon_core`]: labeled grids and the regional, smoothing and onset primitives
//! - [`monsoon_indices`]: published indices composed from those primitives
//!
//! Building this crate as a `cdylib` produces the `monsoon._lib` Python extension.

pub use monsoon_core;
pub use monsoon_indices;

mod python;
