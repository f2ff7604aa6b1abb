//! Coordinate lookups
//!
//! Selections never require the caller's bounds to sit exactly on grid points: boxes pick
//! the grid points that fall inside them, and single values resolve to the nearest point,
//! optionally only when it lies within a tolerance.

/// Position of the coordinate closest to `target`
///
/// Ties resolve to the first position. NaN coordinates are ignored and an empty axis
/// yields `None`.
pub fn nearest_index(coords: &[f64], target: f64) -> Option<usize> {
    coords
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &c)| {
            let distance = (c - target).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((i, distance)),
            }
        })
        .map(|(i, _)| i)
}

/// Nearest coordinate within `tolerance` of `target`, else `None`
pub fn find_within(coords: &[f64], target: f64, tolerance: f64) -> Option<usize> {
    nearest_index(coords, target).filter(|&i| (coords[i] - target).abs() <= tolerance)
}

/// Positions with `lo <= c <= hi`
pub fn indices_within(coords: &[f64], lo: f64, hi: f64) -> Vec<usize> {
    coords
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c >= lo && c <= hi)
        .map(|(i, _)| i)
        .collect()
}

/// Positions of longitudes inside `[lo, hi]`
///
/// When `hi < lo` the range wraps through the date line (or the prime meridian on a
/// 0..360 grid) and selects `c >= lo || c <= hi`.
pub fn longitude_indices(coords: &[f64], lo: f64, hi: f64) -> Vec<usize> {
    if hi < lo {
        coords
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c >= lo || c <= hi)
            .map(|(i, _)| i)
            .collect()
    } else {
        indices_within(coords, lo, hi)
    }
}

/// Whether two coordinate vectors describe the same axis
///
/// Lengths must match and every pair must agree once rounded to two decimal places.
pub fn coordinates_agree(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| ((x - y) * 100.0).round() == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_prefers_first_of_ties() {
        let coords = [0.0, 10.0, 20.0];
        assert_eq!(nearest_index(&coords, 5.0), Some(0));
        assert_eq!(nearest_index(&coords, 14.0), Some(1));
        assert_eq!(nearest_index(&coords, 100.0), Some(2));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn find_within_respects_tolerance() {
        let coords = [100000.0, 92500.0, 85000.0];
        assert_eq!(find_within(&coords, 85000.0, 1e-3), Some(2));
        assert_eq!(find_within(&coords, 87000.0, 1e-3), None);
        assert_eq!(find_within(&coords, 87000.0, 5000.0), Some(2));
    }

    #[test]
    fn wrapped_longitudes_select_union() {
        let coords: Vec<f64> = (0..36).map(|i| i as f64 * 10.0).collect();
        let selected = longitude_indices(&coords, 350.0, 10.0);
        let values: Vec<f64> = selected.iter().map(|&i| coords[i]).collect();
        assert_eq!(values, vec![0.0, 10.0, 350.0]);
    }

    #[test]
    fn plain_longitudes_are_inclusive() {
        let coords = [100.0, 105.0, 110.0, 115.0, 120.0, 125.0];
        assert_eq!(longitude_indices(&coords, 110.0, 120.0), vec![2, 3, 4]);
    }

    #[test]
    fn coordinate_agreement_rounds_to_two_decimals() {
        assert!(coordinates_agree(&[1.0, 2.0], &[1.004, 1.999]));
        assert!(!coordinates_agree(&[1.0, 2.0], &[1.02, 2.0]));
        assert!(!coordinates_agree(&[1.0], &[1.0, 2.0]));
    }
}
