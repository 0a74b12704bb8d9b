//! Portal Engine -- planning sessions with undo/redo, persistence, and
//! link caching.
//!
//! This crate drives [`portal_world`]: it owns the working [`World`], tracks
//! edit history, saves and loads the JSON document format, and keeps a
//! lazily recomputed [`LinkGraph`](portal_world::links::LinkGraph) keyed by
//! a BLAKE3 hash of the world state.
//!
//! # Quick Start
//!
//! ```
//! use portal_engine::prelude::*;
//!
//! let mut session = Session::new();
//! session.add_portal(Dimension::Overworld, WorldPos { x: 80.0, y: 64.0, z: 80.0 });
//! session.add_portal(Dimension::Nether, WorldPos { x: 80.0, y: 64.0, z: 80.0 });
//! session.commit().unwrap();
//!
//! // The two portals link to each other.
//! let overworld_id = session.world().portals[Dimension::Overworld][0].id;
//! let links = session.links();
//! assert!(links.get(overworld_id).is_some());
//!
//! // Edits are undoable once committed.
//! session.undo().unwrap();
//! assert!(session.world().portals[Dimension::Overworld].is_empty());
//! ```

#![deny(unsafe_code)]

pub mod document;
pub mod prefs;
pub mod session;

use std::path::PathBuf;

use portal_world::WorldError;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by session and document operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Reading or writing a document file failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The document or preferences JSON could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// `save()` was called before any file path was established.
    #[error("no file path set; use save_as")]
    NoFilePath,
    /// A loaded or imported world failed validation.
    #[error(transparent)]
    World(#[from] WorldError),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    pub use portal_world::prelude::*;

    pub use crate::document::{load_world, save_world, world_hash};
    pub use crate::prefs::Preferences;
    pub use crate::session::Session;
    pub use crate::EngineError;
}
