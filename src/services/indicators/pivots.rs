//! Classic floor pivot points.

use crate::types::PivotPoints;

/// Floor pivots from a session high, low and close.
///
/// Returns `None` for a degenerate or non-finite range.
pub fn pivot_points(high: f64, low: f64, close: f64) -> Option<PivotPoints> {
    if !(high.is_finite() && low.is_finite() && close.is_finite()) || high < low || high <= 0.0 {
        return None;
    }

    let pivot = (high + low + close) / 3.0;
    let range = high - low;

    Some(PivotPoints {
        pivot,
        r1: 2.0 * pivot - low,
        r2: pivot + range,
        r3: high + 2.0 * (pivot - low),
        s1: 2.0 * pivot - high,
        s2: pivot - range,
        s3: low - 2.0 * (high - pivot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_points_known_values() {
        let p = pivot_points(110.0, 90.0, 100.0).unwrap();
        assert_eq!(p.pivot, 100.0);
        assert_eq!(p.r1, 110.0);
        assert_eq!(p.s1, 90.0);
        assert_eq!(p.r2, 120.0);
        assert_eq!(p.s2, 80.0);
        assert_eq!(p.r3, 130.0);
        assert_eq!(p.s3, 70.0);
    }

    #[test]
    fn test_pivot_levels_are_ordered() {
        let p = pivot_points(52_000.0, 48_500.0, 50_000.0).unwrap();
        assert!(p.s3 < p.s2 && p.s2 < p.s1 && p.s1 < p.pivot);
        assert!(p.pivot < p.r1 && p.r1 < p.r2 && p.r2 < p.r3);
    }

    #[test]
    fn test_pivot_rejects_inverted_range() {
        assert!(pivot_points(90.0, 110.0, 100.0).is_none());
        assert!(pivot_points(f64::NAN, 1.0, 1.0).is_none());
    }
}
