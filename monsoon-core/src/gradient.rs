//! Finite-difference derivatives
//!
//! Second-order centred differences in the interior and first-order one-sided
//! differences at the two ends, so the derivative has the same length as the input.

use crate::errors::{MonsoonError, MonsoonResult};

/// Derivative of a series with unit spacing
///
/// Series shorter than two points have no derivative and give zeros.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| match i {
            0 => values[1] - values[0],
            i if i == n - 1 => values[n - 1] - values[n - 2],
            i => (values[i + 1] - values[i - 1]) / 2.0,
        })
        .collect()
}

/// Derivative of a series sampled at (possibly uneven) coordinates
pub fn gradient_along(values: &[f64], coords: &[f64]) -> MonsoonResult<Vec<f64>> {
    let n = values.len();
    if coords.len() != n {
        return Err(MonsoonError::Misaligned(format!(
            "{} values but {} coordinates",
            n,
            coords.len()
        )));
    }
    if n < 2 {
        return Ok(vec![0.0; n]);
    }
    Ok((0..n)
        .map(|i| match i {
            0 => (values[1] - values[0]) / (coords[1] - coords[0]),
            i if i == n - 1 => (values[n - 1] - values[n - 2]) / (coords[n - 1] - coords[n - 2]),
            i => {
                let hl = coords[i] - coords[i - 1];
                let hr = coords[i + 1] - coords[i];
                (hl * hl * values[i + 1] - hr * hr * values[i - 1]
                    + (hr * hr - hl * hl) * values[i])
                    / (hl * hr * (hl + hr))
            }
        })
        .collect())
}
