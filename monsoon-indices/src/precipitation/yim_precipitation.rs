//! Yim et al. (2014) regional precipitation means

use crate::parameters::YimPrecipitationParameters;
use monsoon_core::errors::MonsoonResult;
use monsoon_core::reduce::{reduce_region, CellAreaGrid};
use monsoon_core::{Diagnosed, GriddedField};
use serde::{Deserialize, Serialize};

/// Area-weighted precipitation over one Yim et al. (2014) region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YimPrecipitation {
    parameters: YimPrecipitationParameters,
}

impl YimPrecipitation {
    pub fn new() -> Self {
        Self::from_parameters(YimPrecipitationParameters::default())
    }

    pub fn from_parameters(parameters: YimPrecipitationParameters) -> Self {
        Self { parameters }
    }

    pub fn for_region(region: &str) -> Self {
        Self::from_parameters(YimPrecipitationParameters {
            region: region.to_string(),
            ..Default::default()
        })
    }

    pub fn parameters(&self) -> &YimPrecipitationParameters {
        &self.parameters
    }

    pub fn calculate(
        &self,
        precipitation: &GriddedField,
        area: Option<&CellAreaGrid>,
    ) -> MonsoonResult<Diagnosed<GriddedField>> {
        let region = self.parameters.regions.get(&self.parameters.region)?;
        reduce_region(precipitation, region, area)
    }
}
