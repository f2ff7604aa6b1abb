//! Declarative collections of regional indices
//!
//! Indices that reduce a single field to a regional value implement [`RegionalIndex`].
//! They serialize as tagged trait objects, so a suite can be declared in TOML:
//!
//! ```toml
//! [[indices]]
//! index = "WangFan"
//!
//! [[indices]]
//! index = "YimPrecipitation"
//! [indices.parameters]
//! region = "NAF"
//! ```

use crate::precipitation::YimPrecipitation;
use crate::shear::{WangFan, YimVorticity};
use monsoon_core::errors::{MonsoonError, MonsoonResult};
use monsoon_core::reduce::CellAreaGrid;
use monsoon_core::{Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// An index computed from one field by regional averaging
#[typetag::serde(tag = "index")]
pub trait RegionalIndex: Debug + Send + Sync {
    /// Short name used to label results
    fn name(&self) -> String;

    fn calculate(
        &self,
        field: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>>;
}

#[typetag::serde]
impl RegionalIndex for WangFan {
    fn name(&self) -> String {
        "wang_fan".to_string()
    }

    fn calculate(
        &self,
        field: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>> {
        WangFan::calculate(self, field, area)
    }
}

#[typetag::serde]
impl RegionalIndex for YimVorticity {
    fn name(&self) -> String {
        format!("yim_vorticity_{}", self.parameters().region)
    }

    fn calculate(
        &self,
        field: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>> {
        YimVorticity::calculate(self, field, area)
    }
}

#[typetag::serde]
impl RegionalIndex for YimPrecipitation {
    fn name(&self) -> String {
        format!("yim_precipitation_{}", self.parameters().region)
    }

    fn calculate(
        &self,
        field: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>> {
        YimPrecipitation::calculate(self, field, area)
    }
}

/// Result of one index in a suite
pub type SuiteEntry = (String, MonsoonResult<Diagnosed<GriddedField>>);

/// An ordered list of regional indices evaluated against the same field
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IndexSuite {
    #[serde(default)]
    indices: Vec<Box<dyn RegionalIndex>>,
}

impl IndexSuite {
    pub fn new(indices: Vec<Box<dyn RegionalIndex>>) -> Self {
        Self { indices }
    }

    pub fn from_toml(source: &str) -> MonsoonResult<Self> {
        toml::from_str(source).map_err(|e| MonsoonError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> MonsoonResult<String> {
        toml::to_string(self).map_err(|e| MonsoonError::Config(e.to_string()))
    }

    pub fn indices(&self) -> &[Box<dyn RegionalIndex>] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Evaluate every index, in order
    ///
    /// A failing index does not stop the others; its error is returned in its entry.
    pub fn evaluate(&self, field: &GriddedField, area: Option<&CellAreaGrid>) -> Vec<SuiteEntry> {
        self.indices
            .iter()
            .map(|index| {
                let name = index.name();
                let result = index.calculate(field, area);
                if let Err(e) = &result {
                    tracing::warn!(index = %name, error = %e, "Index evaluation failed");
                }
                (name, result)
            })
            .collect()
    }
}
