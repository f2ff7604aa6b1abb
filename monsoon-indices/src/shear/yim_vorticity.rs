//! Yim et al. (2014) regional monsoon circulation indices
//!
//! For each regional monsoon the 850 hPa zonal wind averaged over a northern box is
//! subtracted from the average over a southern box, a proxy for the low-level
//! relative vorticity of the monsoon trough. Boxes are defined on 0..360 longitudes;
//! on a -180..180 grid every bound is moved west by 360°.

use crate::parameters::YimVorticityParameters;
use crate::series::at_level;
use monsoon_core::errors::MonsoonResult;
use monsoon_core::reduce::{reduce_region, CellAreaGrid};
use monsoon_core::{Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};

/// Yim et al. (2014) circulation index for one region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YimVorticity {
    parameters: YimVorticityParameters,
}

impl YimVorticity {
    pub fn new() -> Self {
        Self::from_parameters(YimVorticityParameters::default())
    }

    pub fn from_parameters(parameters: YimVorticityParameters) -> Self {
        Self { parameters }
    }

    /// Index for a named region of the default table
    pub fn for_region(region: &str) -> Self {
        Self::from_parameters(YimVorticityParameters {
            region: region.to_string(),
            ..Default::default()
        })
    }

    pub fn parameters(&self) -> &YimVorticityParameters {
        &self.parameters
    }

    /// Calculate the index from zonal wind
    ///
    /// Fails with [`monsoon_core::errors::MonsoonError::UnknownRegion`] when the
    /// configured region is not in the table.
    pub fn calculate(
        &self,
        u: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>> {
        let region = self.parameters.regions.get(&self.parameters.region)?;
        let mut notices = vec![];
        let u = at_level(u, &self.parameters.level, &mut notices)?.field;
        let index = reduce_region(&u, region, area)?.drain_into(&mut notices);
        Ok(Diagnosed::with_notices(index, notices))
    }
}
