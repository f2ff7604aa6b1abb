//! Precipitation indices
//!
//! - `YimPrecipitation`: regional mean precipitation of Yim et al. (2014)
//! - `KitohUchiyama`: rainy season from normalised pentad precipitation (Kitoh & Uchiyama 2006)
//! - `WangLinHo`: rainy season from relative pentad precipitation (Wang & LinHo 2002)

mod kitoh_uchiyama;
mod wang_linho;
mod yim_precipitation;

pub use kitoh_uchiyama::KitohUchiyama;
pub use wang_linho::WangLinHo;
pub use yim_precipitation::YimPrecipitation;
