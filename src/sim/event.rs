//! Events published during a tick
//!
//! The simulation never calls out to listeners. Everything observers may care
//! about (sound, renderer, persistence) is queued here and drained by the host
//! once per tick.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::ghost::GhostId;
use super::level::BonusSymbol;
use super::state::GamePhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: Option<GamePhase>, to: GamePhase },
    CreditAdded { credit: u32 },
    GameStarted,
    LevelStarted { number: u32 },
    LevelCompleted { number: u32 },
    HuntingPhaseStarted { phase: usize, scatter: bool },
    PelletEaten { tile: IVec2 },
    EnergizerEaten { tile: IVec2 },
    PowerStarted,
    PowerFading,
    PowerLost,
    GhostEaten { ghost: GhostId, points: u32 },
    AllGhostsKilled,
    GhostStartsLeavingHouse { ghost: GhostId },
    GhostCompletesLeavingHouse { ghost: GhostId },
    GhostEntersHouse { ghost: GhostId },
    GhostRevived { ghost: GhostId },
    PacKilled,
    PacDyingAnimation,
    ExtraLife { lives: u32 },
    BonusActivated { symbol: BonusSymbol, tile: IVec2 },
    BonusEaten { points: u32, tile: IVec2 },
    BonusExpired,
    HighScoreChanged { points: u32, level: u32 },
    IntermissionStarted { number: u8 },
    GameOver { points: u32, level: u32 },
}
