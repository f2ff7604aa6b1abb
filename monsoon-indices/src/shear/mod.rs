//! Circulation (zonal wind shear) indices
//!
//! - `WangFan`: western North Pacific monsoon index of Wang & Fan (1999)
//! - `YimVorticity`: regional monsoon circulation indices of Yim et al. (2014)

mod wang_fan;
mod yim_vorticity;

pub use wang_fan::WangFan;
pub use yim_vorticity::YimVorticity;
