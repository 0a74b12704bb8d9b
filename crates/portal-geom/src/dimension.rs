//! The two game dimensions and conversion between their coordinate spaces.
//!
//! Horizontal coordinates scale 8:1 between the overworld and the nether;
//! the Y axis is shared. Block coordinates cannot be converted directly --
//! they go through [`WorldPos`](crate::pos::WorldPos) first, because the
//! scaling lands between block boundaries.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Dimension
// ---------------------------------------------------------------------------

/// One of the two dimensions a portal can exist in.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Dimension {
    #[default]
    Overworld,
    Nether,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Overworld => write!(f, "Overworld"),
            Dimension::Nether => write!(f, "Nether"),
        }
    }
}

impl Dimension {
    /// Horizontal coordinate scale of this dimension relative to the nether.
    pub fn scale(self) -> f64 {
        match self {
            Dimension::Overworld => 1.0,
            Dimension::Nether => 8.0,
        }
    }

    /// Lowest block Y coordinate in this dimension.
    pub fn y_min(self) -> i64 {
        match self {
            Dimension::Overworld => -64,
            Dimension::Nether => 0,
        }
    }

    /// Highest block Y coordinate in this dimension.
    pub fn y_max(self) -> i64 {
        match self {
            Dimension::Overworld => 319,
            Dimension::Nether => 255,
        }
    }

    /// Inclusive range of valid block Y coordinates.
    pub fn y_range(self) -> RangeInclusive<i64> {
        self.y_min()..=self.y_max()
    }

    /// Returns the other dimension.
    pub fn other(self) -> Dimension {
        match self {
            Dimension::Overworld => Dimension::Nether,
            Dimension::Nether => Dimension::Overworld,
        }
    }

    /// Returns the number of blocks away from a destination block that a
    /// portal block can be while still being found by the portal search
    /// algorithm.
    ///
    /// - In the overworld, portals are searched within 257x257, so this
    ///   method returns 128.
    /// - In the nether, portals are searched within 33x33, so this method
    ///   returns 16.
    pub fn portal_search_range(self) -> i64 {
        match self {
            Dimension::Overworld => 128,
            Dimension::Nether => 16,
        }
    }
}

// ---------------------------------------------------------------------------
// ConvertDimension
// ---------------------------------------------------------------------------

/// Trait for types that can be converted between dimensions.
pub trait ConvertDimension: Sized {
    #[must_use]
    fn nether_to_overworld(self) -> Self;

    #[must_use]
    fn overworld_to_nether(self) -> Self;

    #[must_use]
    fn convert_dimension(self, from: Dimension, to: Dimension) -> Self {
        match (from, to) {
            (Dimension::Overworld, Dimension::Overworld) => self,
            (Dimension::Overworld, Dimension::Nether) => self.overworld_to_nether(),
            (Dimension::Nether, Dimension::Overworld) => self.nether_to_overworld(),
            (Dimension::Nether, Dimension::Nether) => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
