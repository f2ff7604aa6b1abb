//! Index parameters
//!
//! One parameter struct per published index. Defaults reproduce the constants of the
//! original papers; every field may be overridden from TOML or JSON, and omitted fields
//! keep their defaults.

mod gao_2001;
mod kitoh_uchiyama;
mod li_2018;
mod li_zhang;
mod wang_2004;
mod wang_fan;
mod wang_linho;
mod yim_precipitation;
mod yim_vorticity;

pub use gao_2001::Gao2001Parameters;
pub use kitoh_uchiyama::KitohUchiyamaParameters;
pub use li_2018::Li2018Parameters;
pub use li_zhang::LiZhangParameters;
pub use wang_2004::Wang2004Parameters;
pub use wang_fan::WangFanParameters;
pub use wang_linho::WangLinHoParameters;
pub use yim_precipitation::{yim_precipitation_regions, YimPrecipitationParameters};
pub use yim_vorticity::{yim_vorticity_regions, YimVorticityParameters};
