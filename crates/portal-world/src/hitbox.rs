//! Entity hitbox descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Description of an entity's hitbox.
///
/// An entity's position is at the bottom center of its hitbox. The hitbox
/// determines where the entity can stand while colliding with a portal, and
/// therefore which arrival points are possible on the other side.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct EntityHitbox {
    /// Width of the entity's hitbox along the X and Z axes.
    pub width: f64,
    /// Height of the entity's hitbox along the Y axis.
    pub height: f64,
    /// Whether the entity is a projectile, in which case it is possible to
    /// clip into the portal frame.
    pub is_projectile: bool,
}

impl Default for EntityHitbox {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl EntityHitbox {
    pub const PLAYER: Self = EntityHitbox {
        width: 0.6,
        height: 1.8,
        is_projectile: false,
    };
    pub const GHAST: Self = EntityHitbox {
        width: 4.0,
        height: 4.0,
        is_projectile: false,
    };
    pub const ITEM: Self = EntityHitbox {
        width: 0.25,
        height: 0.25,
        is_projectile: false,
    };
    pub const ARROW: Self = EntityHitbox {
        width: 0.5,
        height: 0.5,
        is_projectile: true,
    };
    pub const ENDER_PEARL: Self = EntityHitbox {
        width: 0.25,
        height: 0.25,
        is_projectile: true,
    };
}

impl fmt::Display for EntityHitbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.width.fmt(f)?;
        write!(f, " x ")?;
        self.height.fmt(f)?;
        if self.is_projectile {
            write!(f, " (projectile)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(EntityHitbox::default(), EntityHitbox::PLAYER);
        assert!(EntityHitbox::ENDER_PEARL.is_projectile);
        assert!(!EntityHitbox::PLAYER.is_projectile);
        assert_eq!(EntityHitbox::GHAST.width, 4.0);
    }

    #[test]
    fn display_marks_projectiles() {
        assert_eq!(EntityHitbox::PLAYER.to_string(), "0.6 x 1.8");
        assert_eq!(EntityHitbox::ARROW.to_string(), "0.5 x 0.5 (projectile)");
    }
}
