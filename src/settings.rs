//! Game settings and preferences
//!
//! Persisted as a JSON file next to the high score records. Missing or
//! unreadable files fall back to the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{EXTRA_LIFE_SCORE, INITIAL_LIVES};
use crate::sim::{GameConfig, GameVariant};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pac-Man or Ms. Pac-Man
    pub variant: GameVariant,
    pub initial_lives: u32,
    /// Points at which the single extra life is awarded
    pub extra_life_score: u32,
    /// Cheat: ghosts cannot kill the player
    pub pac_immune: bool,
    /// RNG seed, None picks one from the clock
    pub seed: Option<u64>,

    // === Storage ===
    /// Directory of the `hiscore-<variant>.json` files
    pub hiscore_dir: PathBuf,

    // === Headless runner ===
    /// Ticks simulated by the runner before it prints the final snapshot
    pub demo_ticks: u64,
    /// Insert a coin and start a game instead of watching attract mode
    pub demo_credit: bool,
    /// Mute the sound log
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: GameVariant::PacMan,
            initial_lives: INITIAL_LIVES,
            extra_life_score: EXTRA_LIFE_SCORE,
            pac_immune: false,
            seed: None,

            hiscore_dir: PathBuf::from("."),

            demo_ticks: 60 * 60,
            demo_credit: false,
            muted: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "maze-chase.json";

    /// Game model configuration; `fallback_seed` is used when no seed is set
    pub fn to_game_config(&self, fallback_seed: u64) -> GameConfig {
        let initial_lives = if self.initial_lives == 0 {
            log::warn!("initial_lives must be at least 1, using 1");
            1
        } else {
            self.initial_lives
        };
        GameConfig {
            variant: self.variant,
            initial_lives,
            extra_life_score: self.extra_life_score,
            pac_immune: self.pac_immune,
            seed: self.seed.unwrap_or(fallback_seed),
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) {
        let result = serde_json::to_string_pretty(self)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }
}
