//! Top-level game state
//!
//! Everything the host needs to advance and render a game: the phase
//! machine, the game model, credit and the input of the running tick.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::fsm::{self, FsmContext, FsmState, Handlers, StateMachine};
use super::game::{Game, GameConfig};
use super::tick::{TickInput, phase_handlers};

/// Credit is capped like on the arcade machine
pub const MAX_CREDIT: u32 = 99;

/// Phases of the top-level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Attract screen, waiting for a coin
    Intro,
    /// Coin inserted, waiting for start
    Credit,
    /// "READY!" before hunting starts
    Ready,
    Hunting,
    LevelComplete,
    LevelStarting,
    PacmanDying,
    /// Short freeze after ghosts were eaten
    GhostDying,
    GameOver,
    Intermission,
    /// Plays all intermission scenes in a row
    IntermissionTest,
}

impl FsmState for GamePhase {
    const ALL: &'static [Self] = &[
        GamePhase::Intro,
        GamePhase::Credit,
        GamePhase::Ready,
        GamePhase::Hunting,
        GamePhase::LevelComplete,
        GamePhase::LevelStarting,
        GamePhase::PacmanDying,
        GamePhase::GhostDying,
        GamePhase::GameOver,
        GamePhase::Intermission,
        GamePhase::IntermissionTest,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

pub struct GameState {
    pub fsm: StateMachine<GamePhase>,
    pub game: Game,
    credit: u32,
    /// A credited game is running (false in attract mode)
    playing: bool,
    /// Intermission scene shown, 0 when none
    pub intermission_number: u8,
    /// Input of the tick being processed
    pub(crate) input: TickInput,
    ticks: u64,
}

impl GameState {
    /// Create the state and enter the intro
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            fsm: StateMachine::new("GameController"),
            game: Game::new(config),
            credit: 0,
            playing: false,
            intermission_number: 0,
            input: TickInput::default(),
            ticks: 0,
        };
        fsm::change_state(&mut state, GamePhase::Intro);
        state
    }

    /// Current phase; the machine is started in [`GameState::new`]
    pub fn phase(&self) -> GamePhase {
        self.fsm.current().unwrap_or(GamePhase::Intro)
    }

    pub fn change_phase(&mut self, phase: GamePhase) {
        fsm::change_state(self, phase);
    }

    pub fn resume_previous_phase(&mut self) {
        fsm::resume_previous_state(self);
    }

    pub fn credit(&self) -> u32 {
        self.credit
    }

    /// Returns false when the credit is already at its maximum
    pub fn add_credit(&mut self) -> bool {
        if self.credit >= MAX_CREDIT {
            return false;
        }
        self.credit += 1;
        log::info!("Credit: {}", self.credit);
        self.game.publish(GameEvent::CreditAdded { credit: self.credit });
        true
    }

    pub fn consume_credit(&mut self) {
        self.credit = self.credit.saturating_sub(1);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Attract mode: the game runs by itself without credit
    pub fn is_attract_mode(&self) -> bool {
        !self.playing
    }

    /// Ticks processed since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub(crate) fn count_tick(&mut self) {
        self.ticks += 1;
    }

    /// Events published since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }
}

impl FsmContext<GamePhase> for GameState {
    fn fsm(&self) -> &StateMachine<GamePhase> {
        &self.fsm
    }

    fn fsm_mut(&mut self) -> &mut StateMachine<GamePhase> {
        &mut self.fsm
    }

    fn handlers(phase: GamePhase) -> &'static Handlers<Self> {
        phase_handlers(phase)
    }

    fn on_state_change(&mut self, from: Option<GamePhase>, to: GamePhase) {
        self.game.publish(GameEvent::PhaseChanged { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_intro() {
        let mut state = GameState::new(GameConfig::default());
        assert_eq!(state.phase(), GamePhase::Intro);
        assert_eq!(state.fsm.previous(), None);
        assert!(state.drain_events().contains(&GameEvent::PhaseChanged {
            from: None,
            to: GamePhase::Intro
        }));
    }

    #[test]
    fn test_credit_is_capped() {
        let mut state = GameState::new(GameConfig::default());
        for _ in 0..MAX_CREDIT {
            assert!(state.add_credit());
        }
        assert!(!state.add_credit());
        assert_eq!(state.credit(), MAX_CREDIT);
        state.consume_credit();
        assert_eq!(state.credit(), MAX_CREDIT - 1);
    }

    #[test]
    fn test_phase_indices_match_table() {
        for (i, phase) in GamePhase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }
}
