//! Maze Chase - simulation core of a Pac-Man style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, creatures, ghost AI, game states)
//! - `audio`: Sound effects derived from simulation events
//! - `highscores`: High score record kept per game variant
//! - `persistence`: Loading and saving the high score record
//! - `settings`: Runtime configuration
//! - `session`: Host driver owning the simulation between ticks

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::Score;
pub use session::Session;
pub use settings::Settings;
pub use sim::GameVariant;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Ticks per second of the fixed timestep
    pub const FPS: u64 = 60;

    /// Tile size in pixels
    pub const TS: i32 = 8;
    /// Half tile size in pixels
    pub const HTS: i32 = 4;

    /// World dimensions in tiles
    pub const WORLD_COLS: i32 = 28;
    pub const WORLD_ROWS: i32 = 36;

    /// Speed (pixels per tick) that level speed percentages refer to
    pub const BASE_SPEED: f32 = 1.25;

    /// Scoring
    pub const PELLET_VALUE: u32 = 10;
    pub const ENERGIZER_VALUE: u32 = 50;
    pub const FIRST_GHOST_BOUNTY: u32 = 200;
    pub const ALL_GHOSTS_KILLED_POINTS: u32 = 12_000;

    /// Ticks the player rests after eating
    pub const PELLET_RESTING_TICKS: u32 = 1;
    pub const ENERGIZER_RESTING_TICKS: u32 = 3;

    /// Eaten-food counts that activate the bonus
    pub const BONUS_FOOD_COUNTS: [u32; 2] = [70, 170];

    pub const INITIAL_LIVES: u32 = 3;
    pub const EXTRA_LIFE_SCORE: u32 = 10_000;
}

/// Convert seconds to ticks
#[inline]
pub const fn sec_to_ticks(seconds: u64) -> u64 {
    seconds * consts::FPS
}

/// Tile containing a pixel position
#[inline]
pub fn tile_at(position: Vec2) -> IVec2 {
    (position / consts::TS as f32).floor().as_ivec2()
}

/// Pixel position of a tile's center
#[inline]
pub fn tile_center(tile: IVec2) -> Vec2 {
    (tile * consts::TS + IVec2::splat(consts::HTS)).as_vec2()
}

/// Position half a tile right of a tile's center (between two tiles)
#[inline]
pub fn half_tile_right_of(tile: IVec2) -> Vec2 {
    tile_center(tile) + Vec2::new(consts::HTS as f32, 0.0)
}
