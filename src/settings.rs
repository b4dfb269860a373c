//! Game settings and preferences
//!
//! Persisted as JSON next to the high score file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::highscores::DEFAULT_HIGHSCORE_FILE;
use crate::sim::{FieldBounds, MovementMode};

/// Default settings file, relative to the working directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Control model at session start (toggle in game)
    pub movement_mode: MovementMode,

    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Persistence ===
    /// Where the high score lives
    pub highscore_path: PathBuf,

    // === Determinism ===
    /// Fixed RNG seed; `None` picks a fresh one per session
    pub seed: Option<u64>,

    // === Headless demo ===
    /// Let the autopilot drive
    pub autopilot: bool,
    /// Stop the demo after this many seconds of play
    pub demo_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            movement_mode: MovementMode::Physics,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),

            seed: None,

            autopilot: true,
            demo_seconds: 60.0,
        }
    }
}

impl Settings {
    /// Play field, falling back to the defaults for non-positive sizes
    pub fn bounds(&self) -> FieldBounds {
        let valid = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        FieldBounds {
            width: valid(self.field_width, FIELD_WIDTH),
            height: valid(self.field_height, FIELD_HEIGHT),
        }
    }

    /// Session seed: the configured one or a random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Load settings from a JSON file, defaults on missing or invalid content
    pub fn load(path: &Path) -> Self {
        if let Ok(json) = fs::read_to_string(path) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring invalid settings in {}: {}", path.display(), e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON (best effort)
    pub fn save(&self, path: &Path) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            match fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
            }
        }
    }
}
