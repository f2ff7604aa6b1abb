//! Frontal indices
//!
//! - [`Li2018`]: Meiyu-Baiu front latitude from the meridional gradient of equivalent
//!   potential temperature

mod li_2018;

pub use li_2018::{Li2018, MeiyuFront};
