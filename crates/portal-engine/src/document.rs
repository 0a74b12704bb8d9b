//! World document persistence and state hashing.
//!
//! Worlds persist as pretty-printed JSON files. Loading validates portal
//! shapes before the world reaches a session, so a hand-edited document with
//! an impossible portal is rejected up front. [`world_hash`] produces a
//! BLAKE3 hex digest of the canonical JSON encoding, used to detect world
//! changes cheaply (link-cache invalidation).

use std::path::Path;

use portal_world::world::World;

use crate::EngineError;

// ---------------------------------------------------------------------------
// Save / load
// ---------------------------------------------------------------------------

/// Writes `world` to `path` as pretty-printed JSON.
pub fn save_world(world: &World, path: &Path) -> Result<(), EngineError> {
    let contents = serde_json::to_string_pretty(world)?;
    std::fs::write(path, contents).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "saved world");
    Ok(())
}

/// Reads and validates a world from the JSON file at `path`.
///
/// Portal IDs are not persisted; every portal gets a fresh ID on load.
pub fn load_world(path: &Path) -> Result<World, EngineError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let world: World = serde_json::from_str(&contents)?;
    world.validate()?;
    tracing::info!(path = %path.display(), "loaded world");
    Ok(world)
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Computes the BLAKE3 hex digest (64 lowercase hex chars) of the world's
/// canonical JSON encoding.
///
/// Portal IDs are serde-skipped, so the hash covers only persistent state:
/// two worlds that serialize identically hash identically regardless of the
/// IDs assigned in this process.
pub fn world_hash(world: &World) -> String {
    let json_bytes =
        serde_json::to_vec(world).expect("World should always be JSON-serializable");
    blake3::hash(&json_bytes).to_hex().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use portal_world::portal::{Portal, PortalAxis};
    use portal_world::prelude::*;

    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("portal-engine-doc-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut world = World::default();
        world.portals[Dimension::Overworld].push(Portal::new_minimal(
            BlockPos { x: 3, y: 70, z: -5 },
            PortalAxis::Z,
            Dimension::Overworld,
        ));
        world.test_points[Dimension::Nether].push(WorldPos {
            x: 0.5,
            y: 64.0,
            z: 0.5,
        });

        let path = temp_path("round-trip");
        save_world(&world, &path).unwrap();
        let loaded = load_world(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        // IDs are regenerated, everything else survives.
        assert_eq!(
            loaded.portals[Dimension::Overworld][0].region,
            world.portals[Dimension::Overworld][0].region
        );
        assert_eq!(loaded.test_points, world.test_points);
        assert_eq!(world_hash(&loaded), world_hash(&world));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_world(Path::new("/nonexistent/world.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn load_malformed_json_is_json_error() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_world(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, EngineError::Json(_)));
    }

    #[test]
    fn load_invalid_portal_is_world_error() {
        let path = temp_path("invalid-portal");
        // A 1-wide portal violates the minimum inner area.
        std::fs::write(
            &path,
            r#"{"portals": {"overworld": [
                {"region": {"min": {"x": 0, "y": 64, "z": 0},
                            "max": {"x": 0, "y": 66, "z": 0}},
                 "axis": "X"}
            ], "nether": []}}"#,
        )
        .unwrap();
        let err = load_world(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, EngineError::World(_)));
    }

    #[test]
    fn hash_ignores_portal_ids() {
        let mut a = World::default();
        a.portals[Dimension::Nether].push(Portal::new_minimal(
            BlockPos { x: 0, y: 64, z: 0 },
            PortalAxis::X,
            Dimension::Nether,
        ));
        let mut b = a.clone();
        b.portals[Dimension::Nether][0].id = PortalId::new();
        assert_eq!(world_hash(&a), world_hash(&b));
    }

    #[test]
    fn hash_changes_with_content() {
        let mut world = World::default();
        let empty_hash = world_hash(&world);
        world.test_points[Dimension::Overworld].push(WorldPos {
            x: 1.0,
            y: 2.0,
            z: 3.0,
        });
        assert_ne!(world_hash(&world), empty_hash);
    }
}
