//! The link graph: per-portal outgoing destinations and incoming sources.

use std::collections::HashMap;

use portal_geom::dimension::{ConvertDimension, Dimension};

use crate::hitbox::EntityHitbox;
use crate::id::PortalId;
use crate::portal::Portal;
use crate::world::World;

// ---------------------------------------------------------------------------
// LinkResult
// ---------------------------------------------------------------------------

/// Where entering a portal can lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkResult {
    /// The entity's hitbox does not fit inside the portal, so it can never
    /// use it.
    EntityWontFit,
    /// Portals the entity may arrive at.
    Portals {
        /// Existing destination portals reachable from some arrival point.
        ids: Vec<PortalId>,
        /// Whether some arrival point would generate a new portal instead.
        may_generate_new: bool,
    },
}

/// Outgoing and incoming links for one portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalLinks {
    /// Where entering this portal leads.
    pub outgoing: LinkResult,
    /// Portals whose outgoing links include this portal.
    pub incoming: Vec<PortalId>,
}

// ---------------------------------------------------------------------------
// LinkGraph
// ---------------------------------------------------------------------------

/// Link results for every portal in a world, for a fixed entity hitbox.
///
/// Cheap to query, expensive to build; recompute it only when the world or
/// the selected entity changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    links: HashMap<PortalId, PortalLinks>,
}

impl LinkGraph {
    /// Computes the full link graph for `world` with the given hitbox.
    pub fn compute(world: &World, hitbox: EntityHitbox) -> Self {
        let mut links: HashMap<PortalId, PortalLinks> = HashMap::new();

        // Outgoing connections.
        for dimension in [Dimension::Overworld, Dimension::Nether] {
            for portal in &world.portals[dimension] {
                links.insert(
                    portal.id,
                    PortalLinks {
                        outgoing: outgoing_links(world, portal, dimension, hitbox),
                        incoming: Vec::new(),
                    },
                );
            }
        }

        // Invert into incoming connections.
        let outgoing: Vec<(PortalId, Vec<PortalId>)> = links
            .iter()
            .filter_map(|(&id, entry)| match &entry.outgoing {
                LinkResult::Portals { ids, .. } => Some((id, ids.clone())),
                LinkResult::EntityWontFit => None,
            })
            .collect();
        for (source, destinations) in outgoing {
            for destination in destinations {
                match links.get_mut(&destination) {
                    Some(entry) => entry.incoming.push(source),
                    None => tracing::error!(%destination, "no destination portal with that id"),
                }
            }
        }

        LinkGraph { links }
    }

    /// Returns the links for a portal, if it is in the graph.
    pub fn get(&self, id: PortalId) -> Option<&PortalLinks> {
        self.links.get(&id)
    }

    /// Iterates over all portals in the graph.
    pub fn iter(&self) -> impl Iterator<Item = (PortalId, &PortalLinks)> {
        self.links.iter().map(|(&id, entry)| (id, entry))
    }

    /// Number of portals in the graph.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Computes the outgoing link result for one portal.
fn outgoing_links(
    world: &World,
    portal: &Portal,
    portal_dimension: Dimension,
    hitbox: EntityHitbox,
) -> LinkResult {
    let destination_dimension = portal_dimension.other();
    let Some(entry_region) = portal.entity_collision_region(hitbox) else {
        return LinkResult::EntityWontFit;
    };
    let destination_region = entry_region
        .convert_dimension(portal_dimension, destination_dimension)
        .block_region_containing();
    let destinations = world.portal_destinations(destination_dimension, destination_region);
    LinkResult::Portals {
        ids: destinations.portals.iter().map(|p| p.id).collect(),
        may_generate_new: destinations.may_generate_new,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
