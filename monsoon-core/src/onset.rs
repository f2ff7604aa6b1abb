//! Threshold edge detection
//!
//! Season-definition indices threshold a smoothed seasonal cycle and report, per grid
//! cell, where the series first and last reaches the threshold. Values at or above the
//! threshold count as inside the season; everything else, including NaN, is outside.
//!
//! All positions are 1-based (the first pentad is 1). A cell whose series never reaches
//! the threshold has NaN onset, withdrawal and duration; that is a result, not an error.
//!
//! The peak is the position of the largest in-season value. A peak at position 1 is
//! reported as NaN, the same value produced when no step is in season.

use crate::errors::MonsoonResult;
use crate::grid::{AxisKind, GriddedField};
use serde::{Deserialize, Serialize};

/// How the threshold is compared against each series
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThresholdMode {
    /// Compare raw values, e.g. precipitation excess in mm/day
    #[default]
    Absolute,
    /// Rescale each cell's series to [0, 1] by its own minimum and maximum first
    Normalised,
}

/// Edges of the season in one series
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OnsetRecord {
    pub onset: f64,
    pub withdrawal: f64,
    pub peak: f64,
    pub duration: f64,
}

/// Edges of the season for every grid cell
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonRecord {
    pub onset: GriddedField,
    pub withdrawal: GriddedField,
    pub peak: GriddedField,
    pub duration: GriddedField,
}

/// Min-max normalisation of a series to [0, 1]
///
/// NaN values are ignored when finding the extremes. A constant series has no range
/// and normalises to NaN.
pub fn normalise_series(series: &[f64]) -> Vec<f64> {
    let (min, max) = series
        .iter()
        .filter(|x| !x.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    let range = max - min;
    if !(range.is_finite() && range > 0.0) {
        return vec![f64::NAN; series.len()];
    }
    series.iter().map(|x| (x - min) / range).collect()
}

/// Find the season edges of a single series
pub fn detect_edges(series: &[f64], threshold: f64) -> OnsetRecord {
    let in_season = |x: &f64| *x >= threshold;

    let onset = series.iter().position(in_season);
    let withdrawal = series.iter().rposition(in_season);

    let peak = series
        .iter()
        .enumerate()
        .filter(|&(_, x)| in_season(x))
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, top)) if top >= x => best,
            _ => Some((i, x)),
        })
        .map_or(0, |(i, _)| i);

    let label = |index: Option<usize>| index.map_or(f64::NAN, |i| (i + 1) as f64);
    let onset = label(onset);
    let withdrawal = label(withdrawal);
    let peak = match peak + 1 {
        1 => f64::NAN,
        p => p as f64,
    };
    OnsetRecord {
        onset,
        withdrawal,
        peak,
        duration: withdrawal - onset,
    }
}

/// Find the season edges of every grid cell of a field
///
/// The `along` axis is removed; the four result fields share the remaining axes.
pub fn detect_season(
    field: &GriddedField,
    along: AxisKind,
    threshold: f64,
    mode: ThresholdMode,
) -> MonsoonResult<SeasonRecord> {
    let cells = field.cells_along(along)?;
    let records: Vec<OnsetRecord> = (0..cells.n_cells())
        .map(|i| {
            let series = cells.cell(i);
            match mode {
                ThresholdMode::Absolute => detect_edges(&series, threshold),
                ThresholdMode::Normalised => detect_edges(&normalise_series(&series), threshold),
            }
        })
        .collect();

    let missing = records.iter().filter(|r| r.onset.is_nan()).count();
    tracing::debug!(
        cells = records.len(),
        missing,
        threshold,
        ?mode,
        "Detected season edges"
    );

    let collect = |f: fn(&OnsetRecord) -> f64| cells.collapse(records.iter().map(f).collect());
    Ok(SeasonRecord {
        onset: collect(|r| r.onset)?,
        withdrawal: collect(|r| r.withdrawal)?,
        peak: collect(|r| r.peak)?,
        duration: collect(|r| r.duration)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coordinate;
    use approx::assert_relative_eq;
    use ndarray::{ArrayD, IxDyn};
    use std::f64::consts::PI;

    fn seasonal(n: usize) -> Vec<f64> {
        (1..=n)
            .map(|t| 0.5 + 0.5 * (2.0 * PI * (t - 1) as f64 / n as f64).sin())
            .collect()
    }

    #[test]
    fn sine_season_matches_closed_form() {
        let n = 73;
        let record = detect_edges(&seasonal(n), 0.618);

        // 0.5 + 0.5 sin(x) >= 0.618  <=>  sin(x) >= 0.236
        let first = 0.236_f64.asin() * n as f64 / (2.0 * PI);
        let last = (PI - 0.236_f64.asin()) * n as f64 / (2.0 * PI);
        let onset = first.ceil() + 1.0;
        let withdrawal = last.floor() + 1.0;

        assert_eq!(record.onset, onset);
        assert_eq!(record.withdrawal, withdrawal);
        assert_eq!(record.onset, 4.0);
        assert_eq!(record.withdrawal, 34.0);
        assert_eq!(record.duration, 30.0);
        // sine maximum at t - 1 = 73 / 4
        assert_eq!(record.peak, 19.0);
    }

    #[test]
    fn never_in_season_is_nan() {
        let record = detect_edges(&seasonal(73), 1.5);
        assert!(record.onset.is_nan());
        assert!(record.withdrawal.is_nan());
        assert!(record.duration.is_nan());
        assert!(record.peak.is_nan());
    }

    #[test]
    fn always_in_season_spans_the_series() {
        let series: Vec<f64> = seasonal(73).iter().map(|x| x + 10.0).collect();
        let record = detect_edges(&series, 1.0);
        assert_eq!(record.onset, 1.0);
        assert_eq!(record.withdrawal, 73.0);
        assert_eq!(record.duration, 72.0);
    }

    #[test]
    fn peak_at_first_step_is_undefined() {
        let record = detect_edges(&[5.0, 4.0, 3.0, 0.0], 1.0);
        assert_eq!(record.onset, 1.0);
        assert_eq!(record.withdrawal, 3.0);
        assert!(record.peak.is_nan());
    }

    #[test]
    fn peak_takes_first_maximum() {
        let record = detect_edges(&[0.0, 2.0, 3.0, 3.0, 1.0], 1.0);
        assert_eq!(record.peak, 3.0);
    }

    #[test]
    fn nan_is_outside_the_season() {
        let record = detect_edges(&[f64::NAN, 2.0, f64::NAN, 2.0, f64::NAN], 1.0);
        assert_eq!(record.onset, 2.0);
        assert_eq!(record.withdrawal, 4.0);
    }

    #[test]
    fn normalisation() {
        assert_eq!(normalise_series(&[2.0, 4.0, 3.0]), vec![0.0, 1.0, 0.5]);
        assert!(normalise_series(&[1.0, 1.0]).iter().all(|x| x.is_nan()));
        let with_gap = normalise_series(&[0.0, f64::NAN, 10.0]);
        assert_eq!(with_gap[2], 1.0);
        assert!(with_gap[1].is_nan());
    }

    #[test]
    fn field_detection_with_normalisation() {
        let n = 73;
        let base = seasonal(n);
        // lat x pentad; second row is a scaled and offset copy, identical once normalised
        let values = ArrayD::from_shape_fn(IxDyn(&[3, n]), |idx| match idx[0] {
            0 => base[idx[1]],
            1 => 100.0 + 20.0 * base[idx[1]],
            _ => 1.0,
        });
        let field = GriddedField::new(
            values,
            vec![Coordinate::latitude(vec![0.0, 10.0, 20.0]), Coordinate::pentads(n)],
        )
        .unwrap();

        let record = detect_season(&field, AxisKind::Time, 0.618, ThresholdMode::Normalised).unwrap();
        assert_eq!(record.onset.shape(), &[3]);
        assert_eq!(
            record.onset.coord(AxisKind::Latitude).unwrap().values,
            vec![0.0, 10.0, 20.0]
        );
        assert_eq!(record.onset.values()[[0]], record.onset.values()[[1]]);
        assert_eq!(record.withdrawal.values()[[0]], record.withdrawal.values()[[1]]);
        // constant row has no range
        assert!(record.onset.values()[[2]].is_nan());
        assert!(record.duration.values()[[2]].is_nan());

        for i in 0..2 {
            assert_relative_eq!(
                record.duration.values()[[i]],
                record.withdrawal.values()[[i]] - record.onset.values()[[i]]
            );
        }
    }

    #[test]
    fn absolute_detection_on_field() {
        let n = 73;
        let base = seasonal(n);
        let values = ArrayD::from_shape_fn(IxDyn(&[n, 2]), |idx| base[idx[0]] * (idx[1] as f64));
        let field = GriddedField::new(
            values,
            vec![Coordinate::pentads(n), Coordinate::longitude(vec![100.0, 110.0])],
        )
        .unwrap();
        let record = detect_season(&field, AxisKind::Time, 0.618, ThresholdMode::Absolute).unwrap();
        assert!(record.onset.values()[[0]].is_nan());
        assert_eq!(record.onset.values()[[1]], 4.0);
        assert_eq!(record.peak.values()[[1]], 19.0);
    }
}
