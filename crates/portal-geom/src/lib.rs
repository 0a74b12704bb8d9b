//! Portal Geom -- coordinate and region math for portal planning.
//!
//! This crate provides the foundational value types for the planner: block
//! and world coordinates, the two game dimensions and their 8:1 horizontal
//! coordinate relationship, and inclusive cuboid regions with the distance
//! and subdivision operations the destination-search algorithm relies on.
//!
//! # Quick Start
//!
//! ```
//! use portal_geom::prelude::*;
//!
//! let pos = WorldPos { x: 80.0, y: 64.0, z: -24.0 };
//! let nether = pos.convert_dimension(Dimension::Overworld, Dimension::Nether);
//! assert_eq!(nether, WorldPos { x: 10.0, y: 64.0, z: -3.0 });
//!
//! let block = BlockPos::from(nether);
//! assert_eq!(block, BlockPos { x: 10, y: 64, z: -3 });
//! ```

#![deny(unsafe_code)]

pub mod dimension;
pub mod pos;
pub mod range;
pub mod region;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::dimension::{ConvertDimension, Dimension};
    pub use crate::pos::{Axis, BlockPos, WorldPos};
    pub use crate::region::{BlockRegion, WorldRegion};
}
