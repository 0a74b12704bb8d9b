//! Block and world coordinates.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::dimension::{ConvertDimension, Dimension};

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// Axis in the world.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// EAST/WEST
    X,
    /// UP/DOWN
    Y,
    /// NORTH/SOUTH
    Z,
}
impl Axis {
    /// Array of all axes.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

// ---------------------------------------------------------------------------
// BlockPos
// ---------------------------------------------------------------------------

/// Block coordinates.
///
/// Note that block coordinates cannot be converted directly between
/// dimensions; they must be converted to world coordinates first.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlockPos {
    /// EAST/WEST
    pub x: i64,
    /// UP/DOWN
    pub y: i64,
    /// NORTH/SOUTH
    pub z: i64,
}

impl<T: Into<Axis>> Index<T> for BlockPos {
    type Output = i64;

    fn index(&self, index: T) -> &Self::Output {
        match index.into() {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl<T: Into<Axis>> IndexMut<T> for BlockPos {
    fn index_mut(&mut self, index: T) -> &mut Self::Output {
        match index.into() {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl From<WorldPos> for BlockPos {
    fn from(value: WorldPos) -> Self {
        let WorldPos { x, y, z } = value;
        BlockPos {
            x: x.floor() as i64,
            y: y.floor() as i64,
            z: z.floor() as i64,
        }
    }
}

impl From<[i64; 3]> for BlockPos {
    fn from([x, y, z]: [i64; 3]) -> Self {
        BlockPos { x, y, z }
    }
}
impl From<BlockPos> for [i64; 3] {
    fn from(BlockPos { x, y, z }: BlockPos) -> Self {
        [x, y, z]
    }
}

impl BlockPos {
    /// Returns the squared Euclidean distance between `self` and `other`.
    pub fn euclidean_distance_sq(&self, other: &Self) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

// ---------------------------------------------------------------------------
// WorldPos
// ---------------------------------------------------------------------------

/// Coordinates within a dimension.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
pub struct WorldPos {
    /// EAST/WEST
    pub x: f64,
    /// UP/DOWN
    pub y: f64,
    /// NORTH/SOUTH
    pub z: f64,
}

impl<T: Into<Axis>> Index<T> for WorldPos {
    type Output = f64;

    fn index(&self, index: T) -> &Self::Output {
        match index.into() {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl<T: Into<Axis>> IndexMut<T> for WorldPos {
    fn index_mut(&mut self, index: T) -> &mut Self::Output {
        match index.into() {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

impl From<BlockPos> for WorldPos {
    fn from(value: BlockPos) -> Self {
        let BlockPos { x, y, z } = value;
        WorldPos {
            x: x as f64,
            y: y as f64,
            z: z as f64,
        }
    }
}

impl ConvertDimension for WorldPos {
    fn nether_to_overworld(self) -> Self {
        WorldPos {
            x: self.x * Dimension::Nether.scale(),
            y: self.y,
            z: self.z * Dimension::Nether.scale(),
        }
    }
    fn overworld_to_nether(self) -> Self {
        WorldPos {
            x: self.x / Dimension::Nether.scale(),
            y: self.y,
            z: self.z / Dimension::Nether.scale(),
        }
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.x.fmt(f)?;
        write!(f, ", ")?;
        self.y.fmt(f)?;
        write!(f, ", ")?;
        self.z.fmt(f)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_pos_floors_world_pos() {
        let pos = WorldPos {
            x: 1.9,
            y: -0.1,
            z: -2.5,
        };
        assert_eq!(BlockPos::from(pos), BlockPos { x: 1, y: -1, z: -3 });
    }

    #[test]
    fn index_by_axis() {
        let mut pos = BlockPos { x: 1, y: 2, z: 3 };
        assert_eq!(pos[Axis::X], 1);
        assert_eq!(pos[Axis::Y], 2);
        assert_eq!(pos[Axis::Z], 3);
        pos[Axis::Z] = 30;
        assert_eq!(pos.z, 30);
    }

    #[test]
    fn dimension_conversion_scales_horizontally() {
        let pos = WorldPos {
            x: 16.0,
            y: 64.0,
            z: -8.0,
        };
        let nether = pos.overworld_to_nether();
        assert_eq!(
            nether,
            WorldPos {
                x: 2.0,
                y: 64.0,
                z: -1.0
            }
        );
        assert_eq!(nether.nether_to_overworld(), pos);
    }

    #[test]
    fn convert_dimension_same_dimension_is_identity() {
        let pos = WorldPos {
            x: 3.5,
            y: 70.0,
            z: 9.25,
        };
        for dim in [Dimension::Overworld, Dimension::Nether] {
            assert_eq!(pos.convert_dimension(dim, dim), pos);
        }
    }

    #[test]
    fn euclidean_distance_sq() {
        let a = BlockPos { x: 0, y: 0, z: 0 };
        let b = BlockPos { x: 1, y: 2, z: -2 };
        assert_eq!(a.euclidean_distance_sq(&b), 9);
    }
}
