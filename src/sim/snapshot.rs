//! Read-only view of a game state for renderers and tooling

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::bonus::BonusState;
use super::direction::Direction;
use super::ghost::{GhostId, GhostState};
use super::level::{BonusSymbol, GameVariant};
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacView {
    pub position: Vec2,
    pub tile: IVec2,
    pub move_dir: Direction,
    pub visible: bool,
    pub dead: bool,
    pub has_power: bool,
    pub power_ticks_left: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostView {
    pub id: GhostId,
    pub name: String,
    pub state: GhostState,
    pub position: Vec2,
    pub move_dir: Direction,
    pub visible: bool,
    /// Points shown while the ghost was just eaten
    pub bounty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusView {
    pub symbol: BonusSymbol,
    pub state: BonusState,
    pub position: Vec2,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelView {
    pub number: u32,
    pub maze_number: u32,
    pub food_remaining: u32,
    /// One bit per tile, set when its food was eaten
    pub eaten: Vec<u64>,
    pub hunting_phase: usize,
    pub scatter: bool,
    pub bonus: Option<BonusView>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub variant: GameVariant,
    pub tick: u64,
    pub phase: GamePhase,
    pub phase_tick: u64,
    /// Ticks until the phase timer expires, None while it runs indefinitely
    pub phase_ticks_remaining: Option<u64>,
    pub credit: u32,
    pub playing: bool,
    pub score: u32,
    pub high_score: u32,
    pub lives: u32,
    pub level: Option<LevelView>,
    pub level_counter: Vec<BonusSymbol>,
    pub intermission: u8,
    pub pac: PacView,
    pub ghosts: Vec<GhostView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let game = &state.game;
        let pac = &game.pac;
        let phase_timer = state.fsm.timer();
        let level = game.level().map(|level| LevelView {
            number: level.number,
            maze_number: level.maze_number,
            food_remaining: level.world.food_remaining(),
            eaten: level.world.eaten_bits().to_vec(),
            hunting_phase: game.hunting.phase(),
            scatter: game.hunting.in_scatter_phase(),
            bonus: level.bonus.symbol().map(|symbol| BonusView {
                symbol,
                state: level.bonus.state(),
                position: level.bonus.body.position,
                points: level.bonus.points(),
            }),
        });
        Self {
            variant: game.variant(),
            tick: state.ticks(),
            phase: state.phase(),
            phase_tick: phase_timer.tick(),
            phase_ticks_remaining: (!phase_timer.is_indefinite()).then(|| phase_timer.remaining()),
            credit: state.credit(),
            playing: state.is_playing(),
            score: game.score(),
            high_score: game.high_score().points,
            lives: game.lives(),
            level,
            level_counter: game.level_counter().to_vec(),
            intermission: state.intermission_number,
            pac: PacView {
                position: pac.body.position,
                tile: pac.tile(),
                move_dir: pac.body.move_dir,
                visible: pac.body.visible,
                dead: pac.dead,
                has_power: pac.has_power(),
                power_ticks_left: if pac.has_power() { pac.power_timer.remaining() } else { 0 },
            },
            ghosts: game
                .ghosts
                .iter()
                .map(|ghost| GhostView {
                    id: ghost.id,
                    name: ghost.body.name.clone(),
                    state: ghost.state,
                    position: ghost.body.position,
                    move_dir: ghost.body.move_dir,
                    visible: ghost.body.visible,
                    bounty: ghost.bounty,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::game::GameConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_snapshot_of_intro() {
        let state = GameState::new(GameConfig::default());
        let snapshot = Snapshot::capture(&state);
        assert_eq!(snapshot.phase, GamePhase::Intro);
        assert!(snapshot.level.is_none());
        assert_eq!(snapshot.ghosts.len(), 4);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.phase_ticks_remaining, None);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut state = GameState::new(GameConfig::default());
        tick(
            &mut state,
            &TickInput {
                skip_state: true,
                ..TickInput::default()
            },
        );
        let snapshot = Snapshot::capture(&state);
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let back: Snapshot = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.phase, GamePhase::Ready);
        // READY in attract mode lasts 2 s and has not been updated yet
        assert_eq!(back.phase_ticks_remaining, Some(2 * crate::consts::FPS));
        assert_eq!(back.level.map(|l| l.food_remaining), Some(244));
    }
}
