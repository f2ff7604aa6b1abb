//! Wind-rotation onset search
//!
//! Monsoon onset can be defined by the low-level wind turning away from its winter
//! direction. With $\beta(t)$ the angle between the wind at step $t$ and the January
//! mean wind, the search runs in two phases per grid cell:
//!
//! - **Sustained condition**: the earliest (onset) or latest (withdrawal) step at which
//!   $\beta$ stays above a threshold for `p` consecutive steps. This gates the next phase.
//! - **Curvature change**: among gated steps, away from a [`CURVATURE_MARGIN`] at each
//!   end, the step maximising $\arctan(\bar{\beta'}_{before}) - \arctan(\bar{\beta'}_{after})$.
//!
//! Steps are converted to pentads with [`step_to_pentad`].

use crate::gradient::gradient;
use serde::{Deserialize, Serialize};

/// Steps excluded at each end of the curvature search, and the width of its windows
pub const CURVATURE_MARGIN: usize = 10;

/// Which edge of the season is being searched for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Onset,
    Withdrawal,
}

/// Angle (radians) between a wind vector and a reference wind vector
///
/// Zero-length vectors have no direction and give NaN.
pub fn rotation_angle(u: f64, v: f64, u_ref: f64, v_ref: f64) -> f64 {
    let magnitude = (u * u + v * v).sqrt() * (u_ref * u_ref + v_ref * v_ref).sqrt();
    ((u_ref * u + v_ref * v) / magnitude).clamp(-1.0, 1.0).acos()
}

/// Earliest step starting a run of at least `p` consecutive exceedances
///
/// A run length below one is treated as one. Runs may start from step 1 up to, but
/// not including, step `len - p`.
pub fn sustained_onset(exceeds: &[bool], p: usize) -> Option<usize> {
    let p = p.max(1);
    if exceeds.len() <= p {
        return None;
    }
    (1..exceeds.len() - p).find(|&i| exceeds[i..i + p].iter().all(|&e| e))
}

/// Latest step ending a run of at least `p` consecutive exceedances
///
/// Runs must end at step `p` or later.
pub fn sustained_withdrawal(exceeds: &[bool], p: usize) -> Option<usize> {
    let p = p.max(1);
    (p..exceeds.len())
        .rev()
        .find(|&i| exceeds[i + 1 - p..=i].iter().all(|&e| e))
}

fn mean_slope(window: &[f64]) -> f64 {
    gradient(window).iter().sum::<f64>() / window.len() as f64
}

/// Change in bounded slope of `beta` across step `i`
///
/// Compares the mean slope over the [`CURVATURE_MARGIN`] steps before `i` with the mean
/// slope over the steps after it. Callers keep `i` at least the margin away from both ends.
pub fn curvature_change(beta: &[f64], i: usize) -> f64 {
    let before = &beta[i - CURVATURE_MARGIN..i];
    let after = &beta[i + 1..i + CURVATURE_MARGIN];
    mean_slope(before).atan() - mean_slope(after).atan()
}

/// Step of maximum curvature change admitted by the sustained-condition gate
///
/// Onsets admit steps at or after the gate, withdrawals steps at or before it. Without
/// a gate, or without any admissible step, there is no transition.
pub fn select_transition(beta: &[f64], gate: Option<usize>, transition: Transition) -> Option<usize> {
    let gate = gate?;
    let n = beta.len();
    if n < 2 * CURVATURE_MARGIN {
        return None;
    }
    (CURVATURE_MARGIN..n - CURVATURE_MARGIN)
        .filter(|&i| match transition {
            Transition::Onset => i >= gate,
            Transition::Withdrawal => i <= gate,
        })
        .map(|i| (i, curvature_change(beta, i)))
        .filter(|(_, change)| !change.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, change)| match best {
            Some((_, top)) if top >= change => best,
            _ => Some((i, change)),
        })
        .map(|(i, _)| i)
}

/// Full two-phase search on one angle series
///
/// Steps count as exceeding when `beta > threshold`; NaN never exceeds.
pub fn rotation_transition(
    beta: &[f64],
    threshold: f64,
    sustain_steps: usize,
    transition: Transition,
) -> Option<usize> {
    let exceeds: Vec<bool> = beta.iter().map(|&b| b > threshold).collect();
    let gate = match transition {
        Transition::Onset => sustained_onset(&exceeds, sustain_steps),
        Transition::Withdrawal => sustained_withdrawal(&exceeds, sustain_steps),
    };
    select_transition(beta, gate, transition)
}

/// Convert a step index to a pentad number
///
/// `offset` is the position of the searched sub-series within the full series.
pub fn step_to_pentad(index: usize, offset: usize) -> f64 {
    ((index + 1 + offset) as f64 / 5.0).round()
}
