//! Destination search: which portals can an arrival region link to?
//!
//! When an entity enters a portal, the game picks an arrival point in the
//! destination dimension and then selects the existing portal whose blocks
//! are closest to that point (within the dimension's horizontal search
//! range). If no portal is in range, a new one is generated.
//!
//! An entity can arrive anywhere inside a portal's collision region, so the
//! planner has to answer the question for a whole [`BlockRegion`] of arrival
//! points at once. Enumerating every block would be quadratic in the region
//! size; instead [`World::portal_destinations`] resolves the region
//! recursively:
//!
//! 1. Prune candidates outside the search range of the region, and
//!    candidates whose *minimum* distance to the region exceeds another
//!    candidate's *maximum* distance (they can never win).
//! 2. Find the nearest candidates at each of the region's 8 corners. Those
//!    are definitely reachable.
//! 3. If every candidate is resolved, stop. Otherwise split the region --
//!    along axes where two adjacent corners disagree, or at an unresolved
//!    candidate's region boundary -- and recurse on the halves.

use portal_geom::dimension::{ConvertDimension, Dimension};
use portal_geom::pos::{Axis, BlockPos, WorldPos};
use portal_geom::region::BlockRegion;

use crate::portal::Portal;
use crate::world::World;

// ---------------------------------------------------------------------------
// PortalDestinations
// ---------------------------------------------------------------------------

/// The outcome of a destination search over an arrival region.
pub struct PortalDestinations<'a> {
    /// Existing portals that at least one arrival point links to.
    pub portals: Vec<&'a Portal>,
    /// Whether some arrival point finds no portal in range, in which case
    /// the game would generate a new portal there.
    pub may_generate_new: bool,
}

// ---------------------------------------------------------------------------
// World search operations
// ---------------------------------------------------------------------------

impl World {
    /// Returns the portals in `destination_dimension` within portal search
    /// range of **any** point in `destination_region`.
    pub fn portals_in_range(
        &self,
        destination_dimension: Dimension,
        destination_region: BlockRegion,
    ) -> impl Iterator<Item = &Portal> {
        self.portals[destination_dimension]
            .iter()
            .filter(move |p| p.is_in_range_of_region(destination_region, destination_dimension))
    }

    /// Returns the exact set of existing portals that some point in
    /// `destination_region` links to, and whether any point links to none.
    pub fn portal_destinations(
        &self,
        destination_dimension: Dimension,
        destination_region: BlockRegion,
    ) -> PortalDestinations<'_> {
        let candidates = &self.portals[destination_dimension];

        let mut confirmed_reachable = vec![false; candidates.len()];
        let mut may_generate_new = false;

        let mut steps = 0;

        mark_reachable_portals(
            destination_dimension,
            destination_region,
            candidates,
            (0..candidates.len()).collect(),
            &mut confirmed_reachable,
            &mut may_generate_new,
            &mut steps,
        );

        tracing::debug!(
            %destination_dimension,
            candidates = candidates.len(),
            steps,
            may_generate_new,
            "resolved portal destinations"
        );

        PortalDestinations {
            portals: confirmed_reachable
                .iter()
                .enumerate()
                .filter(|(_, reachable)| **reachable)
                .map(|(i, _)| &candidates[i])
                .collect(),
            may_generate_new,
        }
    }

    /// Returns the portals an entity standing at `pos` in `source_dimension`
    /// would arrive at.
    ///
    /// The arrival point is `pos` converted to the other dimension; the game
    /// links to the in-range portal(s) whose blocks are nearest to it. Ties
    /// are all returned. An empty result means the game would generate a new
    /// portal.
    pub fn entity_destinations(
        &self,
        source_dimension: Dimension,
        pos: WorldPos,
    ) -> Vec<&Portal> {
        let destination_dimension = source_dimension.other();
        let target = BlockPos::from(pos.convert_dimension(source_dimension, destination_dimension));
        minima_by_opt_key(self.portals[destination_dimension].iter(), |p| {
            p.is_in_range_of_point(target, destination_dimension)
                .then(|| p.region.min_euclidean_distance_sq_to_point(target))
        })
    }
}

// ---------------------------------------------------------------------------
// Recursive region resolution
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn mark_reachable_portals(
    destination_dimension: Dimension,
    destination_region: BlockRegion,
    candidates: &[Portal],
    mut candidates_that_might_be_reachable: Vec<usize>,
    confirmed_reachable: &mut [bool],
    may_generate_new: &mut bool,
    steps: &mut usize,
) {
    *steps += 1;

    // Filter for portals within the search range
    candidates_that_might_be_reachable.retain(|&p| {
        candidates[p].is_in_range_of_region(destination_region, destination_dimension)
    });

    // Filter for portals that are not strictly farther than another portal
    let smallest_max_distance = candidates_that_might_be_reachable
        .iter()
        .map(|&p| destination_region.max_euclidean_distance_sq_to(candidates[p].region))
        .min()
        .unwrap_or(0);
    candidates_that_might_be_reachable.retain(|&p| {
        destination_region.min_euclidean_distance_sq_to(candidates[p].region)
            <= smallest_max_distance
    });

    let corners = destination_region.corners();
    let closest_at_each_corner = corners.map(|corner| {
        minima_by_opt_key(candidates_that_might_be_reachable.iter().copied(), |&p| {
            candidates[p]
                .is_in_range_of_point(corner, destination_dimension)
                .then(|| {
                    candidates[p]
                        .region
                        .min_euclidean_distance_sq_to_point(corner)
                })
        })
    });

    *may_generate_new |= closest_at_each_corner
        .iter()
        .any(|closest_at_corner| closest_at_corner.is_empty());

    for &p in closest_at_each_corner.iter().flatten() {
        confirmed_reachable[p] = true;
    }

    let mut unconfirmed_candidates = candidates_that_might_be_reachable
        .iter()
        .copied()
        .filter(|&p| !confirmed_reachable[p]);

    if unconfirmed_candidates.next().is_none() {
        return; // done! confirmed reachability for all
    }

    // Split along an axis that has a difference.
    let axes_to_split_along = Axis::ALL.map(|axis| {
        let should_split_along_axis = (0..8).any(|corner1| {
            let corner2 = corner1 ^ (1 << axis as usize);
            corner1 < corner2 && closest_at_each_corner[corner1] != closest_at_each_corner[corner2]
        });
        if should_split_along_axis {
            for opt_destination_subregion in destination_region.split_excluding_corners(axis) {
                if let Some(destination_subregion) = opt_destination_subregion {
                    mark_reachable_portals(
                        destination_dimension,
                        destination_subregion,
                        candidates,
                        candidates_that_might_be_reachable.clone(),
                        confirmed_reachable,
                        may_generate_new,
                        steps,
                    );
                }
            }
        }
        should_split_along_axis
    });

    let unconfirmed_candidates = candidates_that_might_be_reachable
        .iter()
        .copied()
        .filter(|&p| !confirmed_reachable[p]);

    // Split along axis for any portal that might be reachable but hasn't yet
    // been reached.
    for p in unconfirmed_candidates {
        for axis in Axis::ALL {
            if axes_to_split_along[axis as usize] {
                continue;
            }
            let candidate_region = candidates[p].region;
            for split_point in [candidate_region.min[axis], candidate_region.max[axis]] {
                if (destination_region.min[axis]..=destination_region.max[axis])
                    .contains(&split_point)
                {
                    if let [Some(lo), Some(hi)] = destination_region.split_at(axis, split_point) {
                        for destination_subregion in [lo, hi] {
                            mark_reachable_portals(
                                destination_dimension,
                                destination_subregion,
                                candidates,
                                candidates_that_might_be_reachable.clone(),
                                confirmed_reachable,
                                may_generate_new,
                                steps,
                            );
                        }
                        return;
                    }
                }
            }
        }
    }
}

/// Returns every item whose key is minimal, skipping items with no key.
pub fn minima_by_opt_key<I: IntoIterator, C: Ord>(
    iter: I,
    f: impl Fn(&I::Item) -> Option<C>,
) -> Vec<I::Item> {
    let mut min_key = None;
    let mut ret = Vec::new();
    for item in iter {
        let Some(key) = f(&item) else {
            continue;
        };
        if min_key.as_ref().is_none_or(|m| key < *m) {
            min_key = Some(key);
            ret.clear();
            ret.push(item);
        } else if min_key == Some(key) {
            ret.push(item);
        }
    }
    ret
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minima_by_opt_key() {
        let xs = vec![
            ("a", Some(4)),
            ("b", Some(2)),
            ("c", Some(1)),
            ("d", None),
            ("e", None),
            ("f", Some(3)),
            ("g", Some(4)),
            ("h", Some(1)),
            ("i", Some(6)),
        ];
        assert_eq!(
            [("c", Some(1)), ("h", Some(1))].as_slice(),
            minima_by_opt_key(xs, |(_, key)| *key).as_slice(),
        );
    }

    #[test]
    fn minima_by_opt_key_empty_when_no_keys() {
        let xs: Vec<(&str, Option<i64>)> = vec![("a", None), ("b", None)];
        assert!(minima_by_opt_key(xs, |(_, key)| *key).is_empty());
    }
}
