//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (60 ticks per second)
//! - Seeded RNG only
//! - Stable iteration order (ghosts by id)
//! - No I/O; observers read the event queue between ticks

pub mod bonus;
pub mod creature;
pub mod direction;
pub mod event;
pub mod fsm;
pub mod game;
pub mod ghost;
pub mod house;
pub mod hunting;
pub mod level;
pub mod maps;
pub mod pac;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;
pub mod world;

pub use bonus::{Bonus, BonusState};
pub use creature::{Creature, MoveResult};
pub use direction::Direction;
pub use event::GameEvent;
pub use game::{Game, GameConfig, StepOutcome};
pub use ghost::{Ghost, GhostId, GhostState};
pub use hunting::HuntingTimer;
pub use level::{BonusSymbol, GameLevel, GameVariant, LevelParams};
pub use pac::Pac;
pub use snapshot::Snapshot;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, autopilot, tick};
pub use timer::{TickTimer, TimerState};
pub use world::{TileKind, World};
