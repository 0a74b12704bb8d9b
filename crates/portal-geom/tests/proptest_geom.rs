//! Property tests for region and coordinate math.
//!
//! These use `proptest` to check the invariants the destination-search
//! algorithm depends on: splits partition regions exactly, distance bounds
//! are ordered, and dimension conversion round-trips.

use portal_geom::prelude::*;
use proptest::prelude::*;

fn block_pos_strategy() -> impl Strategy<Value = BlockPos> {
    (-1_000i64..1_000, -64i64..320, -1_000i64..1_000)
        .prop_map(|(x, y, z)| BlockPos { x, y, z })
}

/// A well-formed region (min <= max on every axis).
fn region_strategy() -> impl Strategy<Value = BlockRegion> {
    (block_pos_strategy(), 0i64..20, 0i64..20, 0i64..20).prop_map(|(min, dx, dy, dz)| {
        BlockRegion {
            min,
            max: BlockPos {
                x: min.x + dx,
                y: min.y + dy,
                z: min.z + dz,
            },
        }
    })
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y), Just(Axis::Z)]
}

fn contains(region: BlockRegion, pos: BlockPos) -> bool {
    (region.min.x..=region.max.x).contains(&pos.x)
        && (region.min.y..=region.max.y).contains(&pos.y)
        && (region.min.z..=region.max.z).contains(&pos.z)
}

proptest! {
    #[test]
    fn split_at_partitions_exactly(
        region in region_strategy(),
        axis in axis_strategy(),
        offset in -5i64..25,
    ) {
        let coordinate = region.min[axis] + offset;
        let halves = region.split_at(axis, coordinate);

        // Every block of the region lands in exactly one half.
        for pos in region.iter() {
            let count = halves
                .iter()
                .flatten()
                .filter(|half| contains(**half, pos))
                .count();
            prop_assert_eq!(count, 1, "block {:?} in {} halves", pos, count);
        }

        // No half contains a block outside the region.
        for half in halves.iter().flatten() {
            prop_assert!(contains(region, half.min));
            prop_assert!(contains(region, half.max));
        }
    }

    #[test]
    fn split_excluding_corners_stays_inside_interior(
        region in region_strategy(),
        axis in axis_strategy(),
    ) {
        for half in region.split_excluding_corners(axis).iter().flatten() {
            prop_assert!(half.min[axis] > region.min[axis]);
            prop_assert!(half.max[axis] < region.max[axis]);
            prop_assert!(half.min[axis] <= half.max[axis]);
        }
    }

    #[test]
    fn distance_bounds_are_ordered(a in region_strategy(), b in region_strategy()) {
        prop_assert!(a.min_euclidean_distance_sq_to(b) <= a.max_euclidean_distance_sq_to(b));
    }

    #[test]
    fn min_distance_is_symmetric(a in region_strategy(), b in region_strategy()) {
        prop_assert_eq!(
            a.min_euclidean_distance_sq_to(b),
            b.min_euclidean_distance_sq_to(a)
        );
    }

    #[test]
    fn min_distance_matches_brute_force_on_points(
        a in region_strategy(),
        pos in block_pos_strategy(),
    ) {
        let expected = a
            .iter()
            .map(|p| p.euclidean_distance_sq(&pos))
            .min()
            .unwrap();
        prop_assert_eq!(a.min_euclidean_distance_sq_to_point(pos), expected);
    }

    #[test]
    fn dimension_conversion_round_trips(pos in block_pos_strategy()) {
        // Powers of two divide exactly in f64, so the round trip is lossless.
        let world = WorldPos::from(pos);
        let back = world.overworld_to_nether().nether_to_overworld();
        prop_assert_eq!(back, world);
    }

    #[test]
    fn block_region_corners_are_extreme(region in region_strategy()) {
        let corners = region.corners();
        prop_assert_eq!(corners[0], region.min);
        prop_assert_eq!(corners[7], region.max);
        for corner in corners {
            prop_assert!(contains(region, corner));
        }
    }
}
