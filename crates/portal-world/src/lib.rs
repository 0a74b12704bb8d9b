//! Portal World -- portals, worlds, and destination search.
//!
//! This crate models the domain of the planner: obsidian-frame portals in
//! either dimension, the world document that holds them, and the algorithms
//! that answer the planner's central question: *which portal does an entity
//! arrive at when it steps through this one?*
//!
//! # Quick Start
//!
//! ```
//! use portal_world::prelude::*;
//!
//! let mut world = World::default();
//! world.portals[Dimension::Nether].push(Portal::new_minimal(
//!     BlockPos { x: 10, y: 64, z: 10 },
//!     PortalAxis::X,
//!     Dimension::Nether,
//! ));
//!
//! // An entity standing at (80, 64, 80) in the overworld arrives at the
//! // nether portal nearest to (10, 64, 10).
//! let destinations = world.entity_destinations(
//!     Dimension::Overworld,
//!     WorldPos { x: 80.0, y: 64.0, z: 80.0 },
//! );
//! assert_eq!(destinations.len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod hitbox;
pub mod id;
pub mod links;
pub mod portal;
pub mod search;
pub mod world;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by world-level operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A portal in a loaded or edited world violates the shape invariants
    /// (minimum 2x3 inner area, zero depth, within the dimension's frame
    /// bounds).
    #[error("portal '{portal}' in the {dimension} has an invalid shape: {reason}")]
    InvalidPortal {
        dimension: portal_geom::dimension::Dimension,
        portal: String,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use portal_geom::prelude::*;

    pub use crate::hitbox::EntityHitbox;
    pub use crate::id::PortalId;
    pub use crate::links::{LinkGraph, LinkResult, PortalLinks};
    pub use crate::portal::{Portal, PortalAxis};
    pub use crate::search::PortalDestinations;
    pub use crate::world::{PerDimension, World};
    pub use crate::WorldError;
}
