//! 1-D distance helpers over inclusive integer ranges.
//!
//! These back the region distance bounds in [`region`](crate::region) and the
//! per-axis portal range predicates: the search algorithm reasons about the
//! closest and farthest a point within one range can be from another range.

use std::ops::RangeInclusive;

/// Returns the smallest distance from any point in `range1` to any point in
/// `range2`. Zero when the ranges overlap.
pub fn min_range_distance_to(
    range1: RangeInclusive<i64>,
    range2: RangeInclusive<i64>,
) -> i64 {
    if range1.end() < range2.start() {
        range2.start() - range1.end()
    } else if range2.end() < range1.start() {
        range1.start() - range2.end()
    } else {
        0 // overlap
    }
}

/// Returns the largest distance from a point in `range1` to the closest point
/// in `range2`.
pub fn max_range_distance_to(
    range1: RangeInclusive<i64>,
    range2: RangeInclusive<i64>,
) -> i64 {
    // Pick the farthest end of `range1`.
    [*range1.start(), *range1.end()]
        // Pick the closest end of `range2`.
        .map(|pos1| min_range_distance_to_pos(range2.clone(), pos1))
        .into_iter()
        .max()
        .unwrap_or(0)
}

/// Returns the distance from `pos` to the closest point in `range`.
pub fn min_range_distance_to_pos(range: RangeInclusive<i64>, pos: i64) -> i64 {
    if *range.end() < pos {
        pos - range.end()
    } else if pos < *range.start() {
        range.start() - pos
    } else {
        0 // contains pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_distance_between_ranges() {
        assert_eq!(min_range_distance_to(0..=5, 8..=10), 3);
        assert_eq!(min_range_distance_to(8..=10, 0..=5), 3);
        assert_eq!(min_range_distance_to(0..=5, 3..=10), 0);
        assert_eq!(min_range_distance_to(3..=4, 0..=10), 0);
    }

    #[test]
    fn max_distance_picks_farthest_end() {
        // Farthest point of 0..=5 from 8..=10 is 0, at distance 8.
        assert_eq!(max_range_distance_to(0..=5, 8..=10), 8);
        // Contained range: farthest end still has to travel to the other.
        assert_eq!(max_range_distance_to(0..=10, 4..=5), 5);
        // Identical ranges.
        assert_eq!(max_range_distance_to(2..=4, 2..=4), 0);
    }

    #[test]
    fn min_distance_to_pos() {
        assert_eq!(min_range_distance_to_pos(0..=5, 9), 4);
        assert_eq!(min_range_distance_to_pos(0..=5, -2), 2);
        assert_eq!(min_range_distance_to_pos(0..=5, 3), 0);
    }
}
