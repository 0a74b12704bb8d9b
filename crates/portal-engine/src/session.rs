//! The planning session: a working world plus edit history, persistence,
//! and the cached link graph.
//!
//! Edits happen in two phases. Callers mutate the world freely through
//! [`Session::world_mut`] (or the convenience edit methods), then call
//! [`Session::commit`] at a natural boundary. Commit compares the world to
//! the last committed baseline; if it changed, the old baseline becomes an
//! undo entry, the redo stack clears, and autosave runs when enabled and a
//! file path is set. Uncommitted edits are simply absorbed into the next
//! commit, so callers can batch as coarsely as they like.

use std::path::Path;

use portal_geom::dimension::{ConvertDimension, Dimension};
use portal_geom::pos::{BlockPos, WorldPos};
use portal_world::hitbox::EntityHitbox;
use portal_world::id::PortalId;
use portal_world::links::LinkGraph;
use portal_world::portal::{Portal, PortalAxis};
use portal_world::world::World;

use crate::document::{load_world, save_world, world_hash};
use crate::prefs::Preferences;
use crate::EngineError;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A planning session over one world document.
#[derive(Default)]
pub struct Session {
    world: World,
    /// The last committed state. Differences between this and `world` are
    /// what `commit` turns into an undo entry.
    committed: World,
    undo_history: Vec<World>,
    redo_history: Vec<World>,
    unsaved_changes: bool,

    pub prefs: Preferences,

    /// Link graph for the last seen (world hash, hitbox) pair.
    cached_links: Option<CachedLinks>,
}

struct CachedLinks {
    world_hash: String,
    hitbox: EntityHitbox,
    graph: LinkGraph,
}

impl Session {
    /// Creates a session over an empty world with default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given preferences. The file path carried
    /// in the preferences is discarded; it refers to a previous session's
    /// document, not this empty world.
    pub fn with_preferences(prefs: Preferences) -> Self {
        Self {
            prefs: Preferences {
                file_path: None,
                ..prefs
            },
            ..Self::default()
        }
    }

    // -- Accessors ----------------------------------------------------------

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the working world. Call [`commit`](Self::commit)
    /// when the edit is complete.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.prefs.file_path.as_deref()
    }

    // -- History ------------------------------------------------------------

    /// Records the pending edits, if any, as one undoable step.
    ///
    /// No-op when the world matches the committed baseline. Otherwise the
    /// old baseline is pushed onto the undo stack, the redo stack clears,
    /// the session is marked unsaved, and autosave runs if enabled.
    pub fn commit(&mut self) -> Result<(), EngineError> {
        if self.committed == self.world {
            return Ok(());
        }
        let old_state = std::mem::replace(&mut self.committed, self.world.clone());
        self.undo_history.push(old_state);
        self.redo_history.clear();
        self.unsaved_changes = true;
        tracing::debug!(undo_depth = self.undo_history.len(), "committed world edit");
        self.autosave()
    }

    /// Reverts to the previous committed state. No-op when the undo stack
    /// is empty. Uncommitted edits are discarded.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        if let Some(new_state) = self.undo_history.pop() {
            let old_state = std::mem::replace(&mut self.world, new_state);
            self.committed = self.world.clone();
            self.redo_history.push(old_state);
            self.unsaved_changes = true;
            self.autosave()?;
        }
        Ok(())
    }

    /// Re-applies the most recently undone state. No-op when the redo stack
    /// is empty.
    pub fn redo(&mut self) -> Result<(), EngineError> {
        if let Some(new_state) = self.redo_history.pop() {
            let old_state = std::mem::replace(&mut self.world, new_state);
            self.committed = self.world.clone();
            self.undo_history.push(old_state);
            self.unsaved_changes = true;
            self.autosave()?;
        }
        Ok(())
    }

    // -- Persistence --------------------------------------------------------

    /// Writes an autosave if enabled, there are unsaved changes, and a file
    /// path is already set. Without a path this is a silent no-op; autosave
    /// must never demand a destination.
    fn autosave(&mut self) -> Result<(), EngineError> {
        if self.prefs.autosave && self.unsaved_changes {
            if let Some(path) = self.prefs.file_path.clone() {
                save_world(&self.world, &path)?;
                self.unsaved_changes = false;
            }
        }
        Ok(())
    }

    /// Loads the document at `path` into this session, replacing the world
    /// and resetting history. On error the session is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<(), EngineError> {
        let world = load_world(path)?;
        self.load(world);
        self.prefs.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Saves to the session's file path.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoFilePath`] when no path is set; use
    /// [`save_as`](Self::save_as) first.
    pub fn save(&mut self) -> Result<(), EngineError> {
        let path = self.prefs.file_path.clone().ok_or(EngineError::NoFilePath)?;
        save_world(&self.world, &path)?;
        self.unsaved_changes = false;
        Ok(())
    }

    /// Saves to `path` and makes it the session's file path.
    pub fn save_as(&mut self, path: &Path) -> Result<(), EngineError> {
        save_world(&self.world, path)?;
        self.prefs.file_path = Some(path.to_path_buf());
        self.unsaved_changes = false;
        Ok(())
    }

    /// Replaces the session's world, clearing history, the unsaved flag,
    /// and the file path.
    pub fn load(&mut self, world: World) {
        self.world = world.clone();
        self.committed = world;
        self.undo_history = vec![];
        self.redo_history = vec![];
        self.unsaved_changes = false;
        self.prefs.file_path = None;
    }

    /// Starts over with an empty world.
    pub fn reset(&mut self) {
        self.load(World::default());
    }

    // -- Import / export ----------------------------------------------------

    /// Serializes the current world to pretty-printed JSON.
    pub fn export_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(&self.world)?)
    }

    /// Replaces the world with one parsed from `json` and commits the change
    /// (so it is undoable). On error the session is left untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), EngineError> {
        let world: World = serde_json::from_str(json)?;
        world.validate()?;
        self.world = world;
        self.commit()
    }

    // -- Convenience edits --------------------------------------------------

    /// Adds a minimal portal in `dimension` at the block under an
    /// overworld-coordinate viewpoint (nether placements divide the
    /// horizontal coordinates by 8). Remember to [`commit`](Self::commit).
    pub fn add_portal(&mut self, dimension: Dimension, overworld_viewpoint: WorldPos) {
        let pos = match dimension {
            Dimension::Overworld => overworld_viewpoint,
            Dimension::Nether => overworld_viewpoint.overworld_to_nether(),
        };
        let portal = Portal::new_minimal(BlockPos::from(pos), PortalAxis::X, dimension);
        self.world.portals[dimension].push(portal);
    }

    /// Adds a test point at `pos` in `dimension`.
    pub fn add_test_point(&mut self, dimension: Dimension, pos: WorldPos) {
        self.world.test_points[dimension].push(pos);
    }

    /// Removes the test point at `index`, if present.
    pub fn remove_test_point(&mut self, dimension: Dimension, index: usize) {
        if index < self.world.test_points[dimension].len() {
            self.world.test_points[dimension].remove(index);
        }
    }

    /// Removes the portal with `id` from `dimension`. Returns whether a
    /// portal was removed.
    pub fn remove_portal(&mut self, dimension: Dimension, id: PortalId) -> bool {
        let portals = &mut self.world.portals[dimension];
        match portals.iter().position(|p| p.id == id) {
            Some(i) => {
                portals.remove(i);
                true
            }
            None => false,
        }
    }

    /// Moves the portal at `from` to position `to` within `dimension`'s
    /// list. Out-of-bounds indices are a no-op.
    pub fn reorder_portal(&mut self, dimension: Dimension, from: usize, to: usize) {
        let portals = &mut self.world.portals[dimension];
        if from < portals.len() && to < portals.len() && from != to {
            let portal = portals.remove(from);
            portals.insert(to, portal);
        }
    }

    // -- Link graph ---------------------------------------------------------

    /// The link graph for the current world and preferred hitbox, recomputed
    /// only when either changes.
    pub fn links(&mut self) -> &LinkGraph {
        let hash = world_hash(&self.world);
        let hitbox = self.prefs.hitbox;
        let cached = match self.cached_links.take() {
            Some(cached) if cached.world_hash == hash && cached.hitbox == hitbox => cached,
            _ => {
                let graph = LinkGraph::compute(&self.world, hitbox);
                tracing::debug!(portals = graph.len(), "recomputed link graph");
                CachedLinks {
                    world_hash: hash,
                    hitbox,
                    graph,
                }
            }
        };
        &self.cached_links.insert(cached).graph
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
