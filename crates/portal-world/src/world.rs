//! The world document: portals and test points per dimension.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use portal_geom::dimension::Dimension;
use portal_geom::pos::WorldPos;

use crate::portal::Portal;
use crate::WorldError;

// ---------------------------------------------------------------------------
// PerDimension
// ---------------------------------------------------------------------------

/// One value per dimension, indexable by [`Dimension`].
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct PerDimension<T> {
    pub overworld: T,
    pub nether: T,
}

impl<T> Index<Dimension> for PerDimension<T> {
    type Output = T;

    fn index(&self, index: Dimension) -> &Self::Output {
        match index {
            Dimension::Overworld => &self.overworld,
            Dimension::Nether => &self.nether,
        }
    }
}

impl<T> IndexMut<Dimension> for PerDimension<T> {
    fn index_mut(&mut self, index: Dimension) -> &mut Self::Output {
        match index {
            Dimension::Overworld => &mut self.overworld,
            Dimension::Nether => &mut self.nether,
        }
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The root of a planning document.
///
/// Serializes to the JSON layout the planner saves and loads:
/// `{ "portals": { "overworld": [..], "nether": [..] }, "test_points": .. }`.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct World {
    /// Portals in each dimension.
    #[serde(default)]
    pub portals: PerDimension<Vec<Portal>>,
    /// Positions to check against the link graph (where would an entity
    /// standing here end up?).
    #[serde(default)]
    pub test_points: PerDimension<Vec<WorldPos>>,
}

impl World {
    /// Returns the portal with the given ID, if it exists, along with the
    /// dimension it is in.
    pub fn portal_by_id(&self, id: crate::id::PortalId) -> Option<(Dimension, &Portal)> {
        for dimension in [Dimension::Overworld, Dimension::Nether] {
            if let Some(portal) = self.portals[dimension].iter().find(|p| p.id == id) {
                return Some((dimension, portal));
            }
        }
        None
    }

    /// Checks every portal against the shape invariants.
    ///
    /// Worlds edited through [`Portal`]'s `adjust_*` methods always pass;
    /// this vets hand-edited or imported documents.
    pub fn validate(&self) -> Result<(), WorldError> {
        for dimension in [Dimension::Overworld, Dimension::Nether] {
            for portal in &self.portals[dimension] {
                if let Some(reason) = portal.shape_error(dimension) {
                    return Err(WorldError::InvalidPortal {
                        dimension,
                        portal: portal.display_name().to_owned(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use portal_geom::pos::BlockPos;
    use crate::portal::PortalAxis;

    #[test]
    fn per_dimension_indexing() {
        let mut counts = PerDimension {
            overworld: 1,
            nether: 2,
        };
        assert_eq!(counts[Dimension::Overworld], 1);
        assert_eq!(counts[Dimension::Nether], 2);
        counts[Dimension::Nether] = 5;
        assert_eq!(counts.nether, 5);
    }

    #[test]
    fn world_json_round_trip_preserves_content() {
        let mut world = World::default();
        let mut portal = Portal::new_minimal(
            BlockPos { x: 3, y: 64, z: -2 },
            PortalAxis::Z,
            Dimension::Overworld,
        );
        portal.name = "spawn".to_owned();
        world.portals[Dimension::Overworld].push(portal);
        world.test_points[Dimension::Nether].push(WorldPos {
            x: 1.5,
            y: 70.0,
            z: -8.0,
        });

        let json = serde_json::to_string_pretty(&world).unwrap();
        let loaded: World = serde_json::from_str(&json).unwrap();

        // IDs are regenerated on load, so compare content field by field.
        let a = &world.portals[Dimension::Overworld][0];
        let b = &loaded.portals[Dimension::Overworld][0];
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, b.name);
        assert_eq!(a.region, b.region);
        assert_eq!(a.axis, b.axis);
        assert_eq!(world.test_points, loaded.test_points);
    }

    #[test]
    fn missing_fields_default_on_load() {
        let world: World = serde_json::from_str("{}").unwrap();
        assert_eq!(world, World::default());
    }

    #[test]
    fn validate_accepts_constructed_and_rejects_corrupt() {
        let mut world = World::default();
        world.portals[Dimension::Nether].push(Portal::new_minimal(
            BlockPos { x: 0, y: 64, z: 0 },
            PortalAxis::X,
            Dimension::Nether,
        ));
        assert!(world.validate().is_ok());

        world.portals[Dimension::Nether][0].region.max.y = 64; // height 1
        let err = world.validate().unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn portal_by_id_finds_dimension() {
        let mut world = World::default();
        let portal = Portal::new_minimal(
            BlockPos { x: 0, y: 64, z: 0 },
            PortalAxis::X,
            Dimension::Nether,
        );
        let id = portal.id;
        world.portals[Dimension::Nether].push(portal);

        let (dimension, found) = world.portal_by_id(id).unwrap();
        assert_eq!(dimension, Dimension::Nether);
        assert_eq!(found.id, id);
        assert!(world.portal_by_id(crate::id::PortalId::new()).is_none());
    }
}
