//! Portal geometry and constrained editing.
//!
//! A portal is a flat rectangle of portal blocks: at least 2 wide and 3 tall,
//! zero depth along its [`PortalAxis`]. The frame occupies one extra block on
//! every side, so portal blocks can only exist strictly inside a dimension's
//! Y range.
//!
//! Editing goes through the `adjust_*` methods: each hands the raw value to a
//! caller closure, then re-establishes the shape invariants, so a portal
//! stays valid no matter what the caller writes.

use serde::{Deserialize, Serialize};

use portal_geom::dimension::{ConvertDimension, Dimension};
use portal_geom::pos::{Axis, BlockPos};
use portal_geom::range::max_range_distance_to;
use portal_geom::region::{BlockRegion, WorldRegion};

use crate::hitbox::EntityHitbox;
use crate::id::PortalId;

// ---------------------------------------------------------------------------
// PortalAxis
// ---------------------------------------------------------------------------

/// Horizontal axis perpendicular to a portal's surface.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PortalAxis {
    /// The portal is entered from east/west; portal width is along
    /// north/south (Z axis).
    X,
    /// The portal is entered from north/south; portal width is along
    /// east/west (X axis).
    Z,
}

impl From<PortalAxis> for Axis {
    fn from(value: PortalAxis) -> Self {
        match value {
            PortalAxis::X => Axis::X,
            PortalAxis::Z => Axis::Z,
        }
    }
}

impl PortalAxis {
    /// Returns the other horizontal axis.
    pub fn other(self) -> PortalAxis {
        match self {
            PortalAxis::X => PortalAxis::Z,
            PortalAxis::Z => PortalAxis::X,
        }
    }
}

// ---------------------------------------------------------------------------
// Portal
// ---------------------------------------------------------------------------

/// Portal in an unspecified dimension.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Portal {
    /// Unique ID for the portal.
    #[serde(skip, default = "PortalId::new")]
    pub id: PortalId,
    /// Human-friendly name of the portal.
    #[serde(default)]
    pub name: String,
    /// Color used to represent the portal when displayed.
    #[serde(default)]
    pub color: [u8; 3],
    /// Region filled with portal blocks in the source dimension.
    pub region: BlockRegion,
    /// Portal axis (opposite from what the game says).
    pub axis: PortalAxis,
}

impl Portal {
    /// Minimum width of a portal.
    pub const MIN_WIDTH: i64 = 2;
    /// Minimum height of a portal.
    pub const MIN_HEIGHT: i64 = 3;

    /// Minimum difference between the minimum and maximum coordinates along
    /// the width of a portal.
    const MIN_DW: i64 = Self::MIN_WIDTH - 1;
    /// Minimum difference between the minimum and maximum coordinates along
    /// the height of a portal.
    const MIN_DH: i64 = Self::MIN_HEIGHT - 1;

    /// Returns the region where an entity can collide with the portal and
    /// thus be teleported using it.
    ///
    /// Returns `None` if the entity won't fit in the portal.
    pub fn entity_collision_region(&self, hitbox: EntityHitbox) -> Option<WorldRegion> {
        let mut result = WorldRegion::from(self.region);
        result.min.x -= hitbox.width / 2.0;
        result.min.z -= hitbox.width / 2.0;
        result.max.x += hitbox.width / 2.0;
        result.max.z += hitbox.width / 2.0;
        if hitbox.is_projectile {
            result.min.y -= hitbox.height;
        }
        if !hitbox.is_projectile {
            // Restrict to within the portal frame.
            result.min[self.width_axis()] += hitbox.width;
            result.max[self.width_axis()] -= hitbox.width;
            result.max.y -= hitbox.height;
        }
        result.is_valid().then_some(result)
    }

    /// Returns the region where an entity may try to arrive.
    /// `destination_dimension` is the dimension the portal leads to, _not_
    /// the one it is in.
    pub fn destination_region(
        &self,
        hitbox: EntityHitbox,
        destination_dimension: Dimension,
    ) -> Option<BlockRegion> {
        Some(
            self.entity_collision_region(hitbox)?
                .convert_dimension(destination_dimension.other(), destination_dimension)
                .block_region_containing(),
        )
    }

    /// Constructs a new portal at `pos` of the smallest possible size,
    /// clamped into the dimension's buildable Y range.
    pub fn new_minimal(pos: BlockPos, axis: PortalAxis, dimension: Dimension) -> Self {
        // Room for the frame below and for the full height plus frame above.
        let y = pos
            .y
            .clamp(dimension.y_min() + 1, dimension.y_max() - Self::MIN_HEIGHT);
        Self {
            id: PortalId::new(),
            name: String::new(),
            color: [127, 127, 127],
            region: BlockRegion {
                min: BlockPos { x: pos.x, y, z: pos.z },
                max: BlockPos {
                    x: pos.x + (axis != PortalAxis::X) as i64 * Self::MIN_DW,
                    y: y + Self::MIN_DH,
                    z: pos.z + (axis != PortalAxis::Z) as i64 * Self::MIN_DW,
                },
            },
            axis,
        }
    }

    /// Constructs a portal from a region for testing. The axis is inferred
    /// from the size, which is assumed to be a valid portal size.
    #[cfg(test)]
    pub fn new_test(region: impl Into<BlockRegion>) -> Self {
        let id = PortalId::new();
        let region: BlockRegion = region.into();
        let axis = if region.min.x == region.max.x {
            PortalAxis::X
        } else if region.min.z == region.max.z {
            PortalAxis::Z
        } else {
            panic!("ambiguous axis")
        };
        Self {
            id,
            name: id.to_string(),
            color: [0; 3],
            region,
            axis,
        }
    }

    /// Returns the axis of the width of the portal.
    pub fn width_axis(&self) -> Axis {
        self.axis.other().into()
    }
    /// Returns the axis of the depth of the portal.
    pub fn depth_axis(&self) -> Axis {
        self.axis.into()
    }

    /// Returns a nonempty human-friendly name for the portal.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "<unnamed>"
        } else {
            &self.name
        }
    }

    /// Returns the reason this portal's shape is invalid, if any.
    ///
    /// Freshly constructed and `adjust_*`-edited portals are always valid;
    /// this exists to vet deserialized documents.
    pub fn shape_error(&self, dimension: Dimension) -> Option<String> {
        let w = self.width_axis();
        let d = self.depth_axis();
        if self.region.min[w] > self.region.max[w]
            || self.region.min.y > self.region.max.y
            || self.region.min[d] > self.region.max[d]
        {
            return Some("region minimum exceeds maximum".to_owned());
        }
        if self.region.max[d] != self.region.min[d] {
            return Some(format!("nonzero depth along the {:?} axis", d));
        }
        let width = self.region.max[w] - self.region.min[w] + 1;
        if width < Self::MIN_WIDTH {
            return Some(format!("width {width} is below the minimum of 2"));
        }
        let height = self.region.max.y - self.region.min.y + 1;
        if height < Self::MIN_HEIGHT {
            return Some(format!("height {height} is below the minimum of 3"));
        }
        // The obsidian frame needs one block above and below.
        if self.region.min.y < dimension.y_min() + 1 || self.region.max.y > dimension.y_max() - 1 {
            return Some(format!(
                "Y range {}..={} leaves no room for the frame in the {dimension}",
                self.region.min.y, self.region.max.y,
            ));
        }
        None
    }

    /// Adjusts `min`, ensuring that the portal is valid. If `lock_size` is
    /// `true`, then the size is preserved; otherwise, `min` is adjusted as
    /// little as possible.
    pub fn adjust_min<R>(
        &mut self,
        f: impl FnOnce(&mut BlockPos) -> R,
        lock_size: bool,
        dimension: Dimension,
    ) -> R {
        let w = self.width_axis();
        let h = Axis::Y; // height axis
        let d = self.depth_axis();

        let min = &mut self.region.min;
        let max = &mut self.region.max;

        let dw = max[w].saturating_sub(min[w]);
        let dd = max[d].saturating_sub(min[d]);
        let dh = max[h].saturating_sub(min[h]);

        let r = f(min);

        // Leave enough room for the old height
        let lowest_min_y = dimension.y_min() + 1;
        let highest_min_y = (dimension.y_max() - 1 - dh).max(lowest_min_y);
        min.y = min.y.clamp(lowest_min_y, highest_min_y);

        if lock_size {
            max[w] = min[w].saturating_add(dw);
            max[h] = min[h].saturating_add(dh);
            max[d] = min[d].saturating_add(dd);
        } else {
            max[w] = max[w].max(min[w].saturating_add(Self::MIN_DW));
            max[h] = max[h].max(min[h].saturating_add(Self::MIN_DH));
            max[d] = max[d].max(min[d]);
        }

        r
    }

    /// Adjusts `max`, ensuring that the portal is valid. If `lock_size` is
    /// `true`, then the size is preserved; otherwise, `max` is adjusted as
    /// little as possible.
    pub fn adjust_max<R>(
        &mut self,
        f: impl FnOnce(&mut BlockPos) -> R,
        lock_size: bool,
        dimension: Dimension,
    ) -> R {
        let w = self.width_axis(); // width axis
        let h = Axis::Y; // height axis
        let d = self.depth_axis(); // depth axis

        let min = &mut self.region.min;
        let max = &mut self.region.max;

        let dw = max[w].saturating_sub(min[w]);
        let dd = max[d].saturating_sub(min[d]);
        let dh = max[h].saturating_sub(min[h]);

        let r = f(max);

        // Leave enough room for the old height
        let highest_max_y = dimension.y_max() - 1;
        let lowest_max_y = (dimension.y_min() + 1 + dh).min(highest_max_y);
        max.y = max.y.clamp(lowest_max_y, highest_max_y);

        if lock_size {
            min[w] = max[w].saturating_sub(dw);
            min[d] = max[d].saturating_sub(dd);
            min[h] = max[h].saturating_sub(dh);
        } else {
            min[w] = min[w].min(max[w].saturating_sub(Self::MIN_DW));
            min[d] = min[d].min(max[d]);
            min[h] = min[h].min(max[h].saturating_sub(Self::MIN_DH));
        }

        r
    }

    /// Adjusts the width of the portal using the provided closure, ensuring
    /// that the portal is valid. `min` is preserved.
    pub fn adjust_width<R>(&mut self, f: impl FnOnce(&mut i64) -> R) -> R {
        let w = self.width_axis();
        let mut width = self.region.max[w] - self.region.min[w] + 1;
        let r = f(&mut width);
        width = width.max(Self::MIN_WIDTH);
        self.region.max[w] = self.region.min[w].saturating_add(width - 1);
        r
    }

    /// Adjusts the height of the portal using the provided closure, ensuring
    /// that the portal is valid. `min` is preserved if possible.
    pub fn adjust_height<R>(&mut self, f: impl FnOnce(&mut i64) -> R, dimension: Dimension) -> R {
        // Bedrock can be broken in survival, but we can't use the full height
        // of the dimension because we need to leave room for the obsidian
        // frame.
        let mut height = self.region.max.y - self.region.min.y + 1;
        let r = f(&mut height);
        height = height.max(Self::MIN_HEIGHT);
        self.region.max.y = self.region.min.y.saturating_add(height - 1);
        if self.region.max.y > dimension.y_max() - 1 {
            let excess = self.region.max.y - (dimension.y_max() - 1);
            self.region.max.y -= excess;
            self.region.min.y -= excess;
            if self.region.min.y < dimension.y_min() + 1 {
                self.region.min.y = dimension.y_min() + 1;
            }
        }
        r
    }

    /// Adjusts the axis of the portal using the provided closure, ensuring
    /// the portal is valid.
    pub fn adjust_axis<R>(&mut self, f: impl FnOnce(&mut PortalAxis) -> R) -> R {
        let w = self.width_axis();

        let min = &mut self.region.min;
        let max = &mut self.region.max;
        let dw = max[w] - min[w];

        let r = f(&mut self.axis);

        let w = self.width_axis();
        let d = self.depth_axis();

        let min = &mut self.region.min;
        let max = &mut self.region.max;
        max[w] = min[w] + dw;
        max[d] = min[d];

        r
    }

    /// Returns whether `self` is within the portal search range for `pos`.
    pub fn is_in_range_of_point(&self, pos: BlockPos, dimension: Dimension) -> bool {
        // Ignore Y axis
        let r = dimension.portal_search_range();
        ((self.region.min.x - r)..=(self.region.max.x + r)).contains(&pos.x)
            && ((self.region.min.z - r)..=(self.region.max.z + r)).contains(&pos.z)
    }

    /// Returns whether `self` is within the portal search range for **any**
    /// point in `region`.
    pub fn is_in_range_of_region(&self, region: BlockRegion, dimension: Dimension) -> bool {
        // Ignore Y axis
        let r = dimension.portal_search_range();
        self.region.min.x <= region.max.x + r
            && self.region.min.z <= region.max.z + r
            && self.region.max.x >= region.min.x - r
            && self.region.max.z >= region.min.z - r
    }

    /// Returns whether `self` is within the portal search range for **all**
    /// points in `region`.
    pub fn is_always_in_range_of_region(&self, region: BlockRegion, dimension: Dimension) -> bool {
        // Ignore Y axis
        let r = dimension.portal_search_range();
        max_range_distance_to(
            region.min.x..=region.max.x,
            self.region.min.x..=self.region.max.x,
        ) <= r
            && max_range_distance_to(
                region.min.z..=region.max.z,
                self.region.min.z..=self.region.max.z,
            ) <= r
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_minimal_has_minimum_size() {
        let portal = Portal::new_minimal(
            BlockPos { x: 5, y: 64, z: 5 },
            PortalAxis::X,
            Dimension::Overworld,
        );
        // Axis X: width along Z.
        assert_eq!(portal.region.min, BlockPos { x: 5, y: 64, z: 5 });
        assert_eq!(portal.region.max, BlockPos { x: 5, y: 66, z: 6 });
        assert_eq!(portal.shape_error(Dimension::Overworld), None);
    }

    #[test]
    fn new_minimal_clamps_under_ceiling() {
        let portal = Portal::new_minimal(
            BlockPos { x: 0, y: 254, z: 0 },
            PortalAxis::Z,
            Dimension::Nether,
        );
        // Frame bound: the top portal block sits below the build limit.
        assert!(portal.region.max.y <= Dimension::Nether.y_max() - 1);
        assert_eq!(
            portal.region.max.y - portal.region.min.y + 1,
            Portal::MIN_HEIGHT
        );
        assert_eq!(portal.shape_error(Dimension::Nether), None);
    }

    #[test]
    fn new_minimal_clamps_above_floor() {
        let portal = Portal::new_minimal(
            BlockPos { x: 0, y: -64, z: 0 },
            PortalAxis::X,
            Dimension::Overworld,
        );
        assert_eq!(portal.region.min.y, Dimension::Overworld.y_min() + 1);
        assert_eq!(portal.shape_error(Dimension::Overworld), None);
    }

    #[test]
    fn player_collision_region() {
        // Portal blocks (0,64,0)..(0,66,1), axis X (width along Z).
        let portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        let region = portal.entity_collision_region(EntityHitbox::PLAYER).unwrap();
        assert_eq!(region.min.x, -0.3);
        assert_eq!(region.max.x, 1.3);
        // Width axis restricted by the frame.
        assert_eq!(region.min.z, -0.3 + 0.6);
        assert_eq!(region.max.z, 2.3 - 0.6);
        // Feet can't be higher than the top minus the hitbox height.
        assert_eq!(region.max.y, 67.0 - 1.8);
        assert_eq!(region.min.y, 64.0);
    }

    #[test]
    fn projectile_collision_region_extends_below() {
        let portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        let region = portal
            .entity_collision_region(EntityHitbox::ENDER_PEARL)
            .unwrap();
        assert_eq!(region.min.y, 64.0 - 0.25);
        assert_eq!(region.max.y, 67.0);
    }

    #[test]
    fn oversized_entity_wont_fit() {
        let portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        assert_eq!(portal.entity_collision_region(EntityHitbox::GHAST), None);
    }

    #[test]
    fn destination_region_converts_dimension() {
        // Nether portal, destination in the overworld.
        let portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        let region = portal
            .destination_region(EntityHitbox::PLAYER, Dimension::Overworld)
            .unwrap();
        // Collision region (-0.3..1.3, 64..65.2, 0.3..1.7) scaled by 8.
        assert_eq!(region.min, BlockPos { x: -3, y: 64, z: 2 });
        assert_eq!(region.max, BlockPos { x: 10, y: 65, z: 13 });
    }

    #[test]
    fn adjust_width_enforces_minimum() {
        let mut portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        portal.adjust_width(|w| *w = 0);
        let w = portal.width_axis();
        assert_eq!(
            portal.region.max[w] - portal.region.min[w] + 1,
            Portal::MIN_WIDTH
        );
    }

    #[test]
    fn adjust_height_shifts_down_at_ceiling() {
        let mut portal = Portal::new_test(([0, 250, 0], [0, 252, 1]));
        portal.adjust_height(|h| *h = 10, Dimension::Nether);
        assert_eq!(portal.region.max.y, Dimension::Nether.y_max() - 1);
        assert_eq!(portal.region.max.y - portal.region.min.y + 1, 10);
    }

    #[test]
    fn adjust_min_with_locked_size_translates() {
        let mut portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        portal.adjust_min(
            |min| {
                min.x += 3;
                min.z += 2;
            },
            true,
            Dimension::Overworld,
        );
        assert_eq!(portal.region.min, BlockPos { x: 3, y: 64, z: 2 });
        assert_eq!(portal.region.max, BlockPos { x: 3, y: 66, z: 3 });
    }

    #[test]
    fn adjust_min_unlocked_keeps_max_when_possible() {
        let mut portal = Portal::new_test(([0, 64, 0], [0, 66, 3]));
        portal.adjust_min(|min| min.z += 1, false, Dimension::Overworld);
        assert_eq!(portal.region.min.z, 1);
        assert_eq!(portal.region.max.z, 3);
    }

    #[test]
    fn adjust_axis_flattens_new_depth_axis() {
        let mut portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        portal.adjust_axis(|axis| *axis = PortalAxis::Z);
        assert_eq!(portal.region.min.z, portal.region.max.z);
        // Width carried over to the X axis.
        assert_eq!(portal.region.max.x - portal.region.min.x, 1);
        assert_eq!(portal.shape_error(Dimension::Overworld), None);
    }

    #[test]
    fn range_predicates() {
        let portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        let dim = Dimension::Overworld;
        assert!(portal.is_in_range_of_point(BlockPos { x: 128, y: 0, z: 0 }, dim));
        assert!(!portal.is_in_range_of_point(BlockPos { x: 129, y: 0, z: 0 }, dim));

        let near = BlockRegion::from(([120, 64, 0], [140, 64, 0]));
        assert!(portal.is_in_range_of_region(near, dim));
        assert!(!portal.is_always_in_range_of_region(near, dim));

        let inside = BlockRegion::from(([-10, 64, -10], [10, 64, 10]));
        assert!(portal.is_always_in_range_of_region(inside, dim));
    }

    #[test]
    fn shape_error_catches_bad_documents() {
        let mut portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        assert_eq!(portal.shape_error(Dimension::Overworld), None);

        portal.region.max.y = 64; // height 1
        assert!(portal.shape_error(Dimension::Overworld).is_some());

        let mut portal = Portal::new_test(([0, 64, 0], [0, 66, 1]));
        portal.region.max.x = 2; // nonzero depth
        assert!(portal.shape_error(Dimension::Overworld).is_some());

        let mut portal = Portal::new_test(([0, 1, 0], [0, 3, 1]));
        assert_eq!(portal.shape_error(Dimension::Nether), None);
        portal.region.min.y = 0; // no room below for the frame
        assert!(portal.shape_error(Dimension::Nether).is_some());
    }

    #[test]
    fn display_name_fallback() {
        let mut portal = Portal::new_minimal(
            BlockPos::default(),
            PortalAxis::X,
            Dimension::Overworld,
        );
        assert_eq!(portal.display_name(), "<unnamed>");
        portal.name = "base".to_owned();
        assert_eq!(portal.display_name(), "base");
    }
}
