//! Onset indices
//!
//! - `Wang2004`: South China Sea onset from westerly persistence (Wang et al. 2004)
//! - `Gao2001`: South China Sea onset from moist static energy and westerlies (Gao et al. 2001)
//! - `LiZhang`: onset and withdrawal from the seasonal rotation of the wind (Li & Zhang 2009)

mod gao_2001;
mod li_zhang;
mod wang_2004;

pub use gao_2001::Gao2001;
pub use li_zhang::{LiZhang, RotationSeason};
pub use wang_2004::{Wang2004, Wang2004Onset};
