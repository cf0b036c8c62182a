//! Fixed timestep simulation tick
//!
//! One call of [`tick`] advances the phase machine by one frame (1/60 s).
//! The phase behaviour is in the handler table below.

use super::direction::Direction;
use super::event::GameEvent;
use super::fsm::{self, Handlers};
use super::game::{Game, StepOutcome};
use super::ghost::GhostState;
use super::level::intermission_after;
use super::state::{GamePhase, GameState};
use crate::sec_to_ticks;

/// Ticks per maze flash when a level is completed
const FLASH_TICKS: u64 = 20;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested player direction
    pub steer: Option<Direction>,
    /// Coin inserted
    pub add_credit: bool,
    /// Start button
    pub start_game: bool,
    /// Leave the current phase early (intro, intermissions) or, while
    /// hunting, clear the level
    pub skip_state: bool,
    /// Play the intermission scenes from the intro
    pub test_intermissions: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.input = input.clone();
    if input.add_credit && state.add_credit() {
        let phase = state.phase();
        if state.is_attract_mode() && !matches!(phase, GamePhase::Credit | GamePhase::IntermissionTest) {
            state.change_phase(GamePhase::Credit);
        }
    }
    fsm::update_state(state);
    state.count_tick();
}

/// Steering used in attract mode: follow the food, otherwise keep going
pub fn autopilot(game: &Game) -> Option<Direction> {
    let level = game.level()?;
    let body = &game.pac.body;
    if !body.new_tile_entered && !body.stuck {
        return None;
    }
    let world = &level.world;
    let tile = body.tile();
    if world.is_portal(tile) {
        return None;
    }
    let reverse = body.move_dir.opposite();
    let open: Vec<Direction> = Direction::TURN_PRIORITY
        .into_iter()
        .filter(|&dir| dir != reverse && body.can_access_tile(world, tile + dir.vector()))
        .collect();
    let danger = |dir: Direction| {
        let next = tile + dir.vector();
        game.ghosts
            .iter()
            .any(|g| g.is(GhostState::HuntingPac) && (g.tile() - next).abs().element_sum() <= 1)
    };
    open.iter()
        .copied()
        .find(|&dir| !danger(dir) && world.contains_food(tile + dir.vector()))
        .or_else(|| open.iter().copied().find(|&dir| dir == body.move_dir && !danger(dir)))
        .or_else(|| open.iter().copied().find(|&dir| !danger(dir)))
        .or_else(|| open.first().copied())
        .or(Some(reverse))
}

pub(crate) fn phase_handlers(phase: GamePhase) -> &'static Handlers<GameState> {
    match phase {
        GamePhase::Intro => &INTRO,
        GamePhase::Credit => &CREDIT,
        GamePhase::Ready => &READY,
        GamePhase::Hunting => &HUNTING,
        GamePhase::LevelComplete => &LEVEL_COMPLETE,
        GamePhase::LevelStarting => &LEVEL_STARTING,
        GamePhase::PacmanDying => &PACMAN_DYING,
        GamePhase::GhostDying => &GHOST_DYING,
        GamePhase::GameOver => &GAME_OVER,
        GamePhase::Intermission => &INTERMISSION,
        GamePhase::IntermissionTest => &INTERMISSION_TEST,
    }
}

fn start_timer(state: &mut GameState, ticks: u64) {
    let timer = state.fsm.timer_mut();
    timer.reset(ticks);
    timer.start();
}

fn start_timer_indefinite(state: &mut GameState) {
    let timer = state.fsm.timer_mut();
    timer.reset_indefinite();
    timer.start();
}

fn timer_expired(state: &GameState) -> bool {
    state.fsm.timer().has_expired()
}

static INTRO: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer_indefinite(state);
        state.game.reset();
        state.set_playing(false);
        state.intermission_number = 0;
    },
    update: |state| {
        if state.credit() > 0 {
            state.change_phase(GamePhase::Credit);
        } else if state.input.test_intermissions {
            state.change_phase(GamePhase::IntermissionTest);
        } else if state.input.skip_state || timer_expired(state) {
            state.change_phase(GamePhase::Ready);
        }
    },
    exit: Handlers::noop,
};

static CREDIT: Handlers<GameState> = Handlers {
    enter: start_timer_indefinite,
    update: |state| {
        if state.input.start_game && state.credit() > 0 {
            state.game.reset();
            state.game.set_level(1);
            state.game.publish(GameEvent::GameStarted);
            log::info!("New {} game", state.game.variant().player_name());
            state.change_phase(GamePhase::Ready);
        }
    },
    exit: Handlers::noop,
};

static READY: Handlers<GameState> = Handlers {
    enter: |state| {
        let fresh_game = !state.is_playing() && state.credit() > 0;
        start_timer(state, sec_to_ticks(if fresh_game { 5 } else { 2 }));
        if state.game.level().is_none() {
            state.game.set_level(1);
        }
        state.game.reset_actors();
    },
    update: |state| {
        if state.fsm.timer().at_second(1.5) {
            state.game.show_actors(true);
        }
        if timer_expired(state) {
            let credited = state.credit() > 0;
            state.game.show_actors(true);
            state.game.scoring_enabled = credited;
            state.set_playing(credited);
            state.game.start_hunting_phase(0);
            state.change_phase(GamePhase::Hunting);
        }
    },
    exit: Handlers::noop,
};

static HUNTING: Handlers<GameState> = Handlers {
    enter: start_timer_indefinite,
    update: |state| {
        if state.input.skip_state {
            if let Some(level) = state.game.level_mut() {
                log::info!("Level {} cleared by cheat", level.number);
                level.world.eat_all_food();
            }
        }
        let steer = match state.input.steer {
            Some(dir) => Some(dir),
            None if state.is_attract_mode() => autopilot(&state.game),
            None => None,
        };
        match state.game.update_hunting(steer) {
            StepOutcome::Running => {}
            StepOutcome::LevelComplete => state.change_phase(GamePhase::LevelComplete),
            StepOutcome::PacKilled => state.change_phase(GamePhase::PacmanDying),
            StepOutcome::GhostsKilled => state.change_phase(GamePhase::GhostDying),
        }
    },
    exit: Handlers::noop,
};

static LEVEL_COMPLETE: Handlers<GameState> = Handlers {
    enter: |state| {
        let flashes = state.game.level().map_or(0, |level| level.params.num_flashes as u64);
        start_timer(state, sec_to_ticks(2) + flashes * FLASH_TICKS);
        state.game.on_level_complete();
        if let Some(number) = state.game.level_number() {
            state.game.publish(GameEvent::LevelCompleted { number });
        }
    },
    update: |state| {
        if !timer_expired(state) {
            return;
        }
        let number = state.game.level_number().unwrap_or(1);
        if state.is_attract_mode() {
            state.change_phase(GamePhase::Intro);
        } else if intermission_after(number) != 0 {
            state.change_phase(GamePhase::Intermission);
        } else {
            state.change_phase(GamePhase::LevelStarting);
        }
    },
    exit: Handlers::noop,
};

static LEVEL_STARTING: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer(state, sec_to_ticks(1));
        let next = state.game.level_number().map_or(1, |n| n + 1);
        state.game.set_level(next);
        state.game.reset_actors();
    },
    update: |state| {
        if timer_expired(state) {
            state.change_phase(GamePhase::Ready);
        }
    },
    exit: Handlers::noop,
};

static PACMAN_DYING: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer(state, sec_to_ticks(4));
        state.game.on_pac_dying();
    },
    update: |state| {
        let timer = state.fsm.timer();
        if timer.at_second(1.0) {
            state.game.show_ghosts(false);
            state.game.publish(GameEvent::PacDyingAnimation);
        } else if timer.at_second(2.5) {
            state.game.pac.body.visible = false;
        } else if timer.has_expired() {
            state.game.lose_life();
            if state.is_attract_mode() {
                state.change_phase(GamePhase::Intro);
            } else if state.game.lives() > 0 {
                state.change_phase(GamePhase::Ready);
            } else {
                state.change_phase(GamePhase::GameOver);
            }
        }
    },
    exit: Handlers::noop,
};

static GHOST_DYING: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer(state, sec_to_ticks(1));
        state.game.pac.body.visible = false;
    },
    update: |state| {
        if timer_expired(state) {
            state.resume_previous_phase();
            return;
        }
        if let Some(dir) = state.input.steer {
            state.game.pac.body.wish_dir = dir;
        }
        state.game.update_ghosts_returning();
    },
    exit: |state| {
        state.game.pac.body.visible = true;
        state.game.end_ghost_kill_pause();
    },
};

static GAME_OVER: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer(state, sec_to_ticks(5));
        state.game.show_actors(true);
        state.game.pac.body.speed = 0.0;
        let points = state.game.score();
        let level = state.game.level_number().unwrap_or(1);
        log::info!("Game over with {points} points at level {level}");
        state.game.publish(GameEvent::GameOver { points, level });
    },
    update: |state| {
        if timer_expired(state) {
            state.set_playing(false);
            state.consume_credit();
            let next = if state.credit() > 0 {
                GamePhase::Credit
            } else {
                GamePhase::Intro
            };
            state.change_phase(next);
        }
    },
    exit: Handlers::noop,
};

static INTERMISSION: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer(state, sec_to_ticks(10));
        let number = state.game.level_number().map_or(1, intermission_after);
        state.intermission_number = number;
        state.game.publish(GameEvent::IntermissionStarted { number });
    },
    update: |state| {
        if state.input.skip_state || timer_expired(state) {
            state.intermission_number = 0;
            let next = if state.is_attract_mode() {
                GamePhase::Intro
            } else {
                GamePhase::LevelStarting
            };
            state.change_phase(next);
        }
    },
    exit: Handlers::noop,
};

static INTERMISSION_TEST: Handlers<GameState> = Handlers {
    enter: |state| {
        start_timer(state, sec_to_ticks(10));
        state.intermission_number = 1;
        state.game.publish(GameEvent::IntermissionStarted { number: 1 });
    },
    update: |state| {
        if !state.input.skip_state && !timer_expired(state) {
            return;
        }
        if state.intermission_number < 3 {
            state.intermission_number += 1;
            start_timer(state, sec_to_ticks(10));
            let number = state.intermission_number;
            log::info!("Test intermission {number}");
            state.game.publish(GameEvent::IntermissionStarted { number });
        } else {
            state.intermission_number = 0;
            state.change_phase(GamePhase::Intro);
        }
    },
    exit: Handlers::noop,
};
