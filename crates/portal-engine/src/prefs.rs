//! User preferences.
//!
//! Preferences persist independently of the world document, as a single JSON
//! string under [`Preferences::STORAGE_KEY`]. Unknown or missing fields fall
//! back to defaults so that older preference blobs keep loading.

use std::path::PathBuf;

use portal_world::hitbox::EntityHitbox;
use serde::{Deserialize, Serialize};

use crate::EngineError;

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Session preferences, autosaved alongside the document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// The entity whose fit and arrival behavior the planner simulates.
    pub hitbox: EntityHitbox,
    /// Whether `adjust_min`/`adjust_max` edits keep the portal size fixed.
    pub lock_portal_size: bool,
    /// Whether committing changes writes to the current file automatically.
    /// Autosave is skipped silently while no file path is set.
    pub autosave: bool,
    /// The file backing the current session, once opened or saved-as.
    pub file_path: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            hitbox: EntityHitbox::PLAYER,
            lock_portal_size: true,
            autosave: true,
            file_path: None,
        }
    }
}

impl Preferences {
    /// Storage key for the serialized preferences blob.
    pub const STORAGE_KEY: &'static str = "prefs";

    /// Serializes the preferences to a JSON string.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes preferences from a JSON string, falling back to the
    /// defaults if the blob is malformed.
    pub fn from_json_or_default(s: &str) -> Self {
        serde_json::from_str(s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "malformed preferences blob, using defaults");
            Self::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
