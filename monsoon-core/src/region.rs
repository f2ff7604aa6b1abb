//! Latitude-longitude boxes and region tables
//!
//! Region tables for published indices are plain configuration data: a mapping from a
//! region key to a [`RegionSpec`] of one or two boxes. Tables are looked up by key and
//! never mutated by the operations that consume them.

use crate::axis::{indices_within, longitude_indices};
use crate::errors::{MonsoonError, MonsoonResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A latitude-longitude box with inclusive bounds
///
/// A box whose `lon_max` is smaller than `lon_min` wraps around, e.g. 330°E to 30°E.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl RegionBox {
    /// Create a box from `[lat_min, lat_max]` and `[lon_min, lon_max]`
    pub const fn new(lat: [f64; 2], lon: [f64; 2]) -> Self {
        Self {
            lat_min: lat[0],
            lat_max: lat[1],
            lon_min: lon[0],
            lon_max: lon[1],
        }
    }

    pub fn wraps(&self) -> bool {
        self.lon_max < self.lon_min
    }

    /// Grid positions along a latitude axis inside the box
    pub fn latitude_indices(&self, lats: &[f64]) -> Vec<usize> {
        indices_within(lats, self.lat_min, self.lat_max)
    }

    /// Grid positions along a longitude axis inside the box, honouring wraparound
    pub fn longitude_indices(&self, lons: &[f64]) -> Vec<usize> {
        longitude_indices(lons, self.lon_min, self.lon_max)
    }

    /// Move bounds given on 0..360 onto a -180..180 grid
    pub fn shifted(&self, shift: LongitudeShift) -> Self {
        match shift {
            LongitudeShift::Both => Self {
                lon_min: self.lon_min - 360.0,
                lon_max: self.lon_max - 360.0,
                ..*self
            },
            LongitudeShift::MinOnly => Self {
                lon_min: self.lon_min - 360.0,
                ..*self
            },
            LongitudeShift::Never => *self,
        }
    }
}

/// How a region defined on 0..360 longitudes is moved onto a grid with negative longitudes
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongitudeShift {
    /// Subtract 360 from both longitude bounds
    #[default]
    Both,
    /// Subtract 360 from the minimum bound only, for boxes straddling the prime meridian
    MinOnly,
    /// Use the bounds as given
    Never,
}

/// One box, or a pair of boxes whose means are differenced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub primary: RegionBox,
    /// Box whose mean is subtracted from the primary mean, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<RegionBox>,
    #[serde(default)]
    pub shift: LongitudeShift,
}

impl RegionSpec {
    pub fn single(primary: RegionBox, shift: LongitudeShift) -> Self {
        Self {
            primary,
            secondary: None,
            shift,
        }
    }

    pub fn pair(primary: RegionBox, secondary: RegionBox, shift: LongitudeShift) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            shift,
        }
    }

    /// Bounds adjusted to the longitude convention of a grid
    ///
    /// Shifts apply only when the grid's smallest longitude is negative.
    pub fn normalised_for(&self, grid_lon_min: f64) -> Self {
        if grid_lon_min < 0.0 {
            Self {
                primary: self.primary.shifted(self.shift),
                secondary: self.secondary.map(|b| b.shifted(self.shift)),
                shift: self.shift,
            }
        } else {
            self.clone()
        }
    }
}

/// Named regions of a published index
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionTable(BTreeMap<String, RegionSpec>);

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, spec: RegionSpec) -> Self {
        self.0.insert(key.to_string(), spec);
        self
    }

    /// Region for a key, or [`MonsoonError::UnknownRegion`]
    pub fn get(&self, key: &str) -> MonsoonResult<&RegionSpec> {
        self.0
            .get(key)
            .ok_or_else(|| MonsoonError::UnknownRegion(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
