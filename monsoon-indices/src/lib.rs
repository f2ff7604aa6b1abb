//! Published monsoon indices
//!
//! Each index composes the primitives of `monsoon-core` with the constants of the paper
//! that defined it.
//!
//! # Module Organisation
//!
//! Indices are organised by what they measure:
//! - `shear`: circulation strength from zonal wind (Wang & Fan 1999, Yim et al. 2014)
//! - `precipitation`: regional rainfall and rainy-season timing (Yim et al. 2014,
//!   Kitoh & Uchiyama 2006, Wang & LinHo 2002)
//! - `onset`: onset dates from winds and thermodynamics (Wang et al. 2004,
//!   Gao et al. 2001, Li & Zhang 2009)
//! - `front`: Meiyu-Baiu front position (Li et al. 2018)
//! - `suite`: TOML-declared collections of regional indices
//!
//! # Parameters
//!
//! Each index has an associated parameters struct in the `parameters` module whose
//! defaults reproduce the published definition.

pub mod front;
pub mod onset;
pub mod parameters;
pub mod precipitation;
pub mod shear;
pub mod suite;

mod series;
