//! Moist thermodynamics
//!
//! Equivalent potential temperature ($\theta_e$) following the AMS glossary form, with
//! all water assumed to be vapour ($r_t = r_v = r$):
//!
//! $$\theta_e = T \left(\frac{p_0}{p}\right)^{R_d/(c_{p} + r c)} H^{-r R_v/(c_{p} + r c)}
//!   \exp\left(\frac{L r}{(c_{p} + r c) T}\right)$$
//!
//! where $H = r / r_s$ is the relative humidity. Pressures are always in Pa.

use crate::errors::MonsoonResult;
use crate::grid::GriddedField;

/// Specific heat of dry air at constant pressure (J/kg/K)
pub const CP_AIR: f64 = 1004.6;
/// Latent heat of vaporisation (J/kg)
pub const LATENT_HEAT: f64 = 2.507e6;
/// Gas constant of dry air (J/kg/K)
pub const RDGAS: f64 = 287.04;
/// Gas constant of water vapour (J/kg/K)
pub const RVGAS: f64 = 461.5;
/// Freezing point (K)
pub const TFREEZE: f64 = 273.16;
/// Heat capacity of liquid water at 0 °C (J/kg/K)
pub const C_LIQUID: f64 = 4217.0;
/// Earth radius (m)
pub const EARTH_RADIUS: f64 = 6371.0e3;
/// Reference pressure (Pa)
pub const P0: f64 = 100000.0;

/// Saturation vapour pressure (Pa) and saturation mixing ratio at temperature `t` (K)
/// and pressure `p` (Pa)
pub fn saturation_vapour_pressure(t: f64, p: f64) -> (f64, f64) {
    let es = 610.78 * (-LATENT_HEAT / RVGAS * (1.0 / t - 1.0 / TFREEZE)).exp();
    let rs = 0.622 * es / p;
    (es, rs)
}

/// Equivalent and saturated equivalent potential temperature (K)
///
/// `t` is temperature (K), `q` specific humidity (kg/kg) and `p` pressure (Pa).
pub fn equivalent_potential_temperature(t: f64, q: f64, p: f64) -> (f64, f64) {
    let r = q / (1.0 - q);
    let denom = CP_AIR + r * C_LIQUID;
    let (_, rs) = saturation_vapour_pressure(t, p);
    let rh = r / rs;
    let denom_s = CP_AIR + rs * C_LIQUID;

    let theta_e = t
        * (P0 / p).powf(RDGAS / denom)
        * rh.powf(-r * RVGAS / denom)
        * (LATENT_HEAT * r / denom / t).exp();
    let theta_es = t * (P0 / p).powf(RDGAS / denom_s) * (LATENT_HEAT * rs / denom_s / t).exp();
    (theta_e, theta_es)
}

/// Equivalent potential temperature of temperature and humidity fields on one level
pub fn theta_e_field(t: &GriddedField, q: &GriddedField, p: f64) -> MonsoonResult<GriddedField> {
    t.zip_with(q, |t, q| equivalent_potential_temperature(t, q, p).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;
    use approx::assert_relative_eq;
    use ndarray::{ArrayD, IxDyn};

    #[test]
    fn saturation_at_freezing() {
        let (es, rs) = saturation_vapour_pressure(TFREEZE, 100000.0);
        assert_relative_eq!(es, 610.78);
        assert_relative_eq!(rs, 0.622 * 610.78 / 100000.0);
    }

    #[test]
    fn dry_air_is_potential_temperature() {
        let (theta_e, _) = equivalent_potential_temperature(300.0, 0.0, 85000.0);
        // H^0 = 1 and exp(0) = 1 leave only the Poisson term
        assert_relative_eq!(
            theta_e,
            300.0 * (100000.0_f64 / 85000.0).powf(RDGAS / CP_AIR),
            epsilon = 1e-9
        );
    }

    #[test]
    fn saturated_air_matches_saturated_theta_e() {
        let (t, p) = (295.0, 85000.0);
        let (_, rs) = saturation_vapour_pressure(t, p);
        let q = rs / (1.0 + rs);
        let (theta_e, theta_es) = equivalent_potential_temperature(t, q, p);
        assert_relative_eq!(theta_e, theta_es, max_relative = 1e-12);
        // moist tropical air at 850 hPa
        assert!(theta_e > 330.0 && theta_e < 370.0);
    }

    #[test]
    fn field_version() {
        let coords = vec![Coordinate::latitude(vec![10.0, 20.0])];
        let t = GriddedField::new(ArrayD::from_elem(IxDyn(&[2]), 300.0), coords.clone()).unwrap();
        let q = GriddedField::new(ArrayD::from_elem(IxDyn(&[2]), 0.015), coords).unwrap();
        let theta = theta_e_field(&t, &q, 85000.0).unwrap();
        assert_relative_eq!(
            theta.values()[[1]],
            equivalent_potential_temperature(300.0, 0.015, 85000.0).0
        );
    }
}
