//! The game model: actors, level, score and lives, and the rules applied on
//! every hunting tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::event::GameEvent;
use super::ghost::{Ghost, GhostContext, GhostId, GhostState};
use super::hunting::HuntingTimer;
use super::level::{BonusSymbol, GameLevel, GameVariant};
use super::pac::Pac;
use crate::consts::{
    ALL_GHOSTS_KILLED_POINTS, BONUS_FOOD_COUNTS, ENERGIZER_RESTING_TICKS, ENERGIZER_VALUE, EXTRA_LIFE_SCORE,
    FIRST_GHOST_BOUNTY, INITIAL_LIVES, PELLET_RESTING_TICKS, PELLET_VALUE,
};
use crate::highscores::Score;

/// Number of bonus symbols kept for the level counter
const LEVEL_COUNTER_SIZE: usize = 7;

/// Fixed parameters of a game model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: GameVariant,
    pub initial_lives: u32,
    pub extra_life_score: u32,
    /// Cheat: hunting ghosts cannot kill the player
    pub pac_immune: bool,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: GameVariant::PacMan,
            initial_lives: INITIAL_LIVES,
            extra_life_score: EXTRA_LIFE_SCORE,
            pac_immune: false,
            seed: 0,
        }
    }
}

/// What a hunting tick ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    LevelComplete,
    PacKilled,
    GhostsKilled,
}

pub struct Game {
    config: GameConfig,
    level: Option<GameLevel>,
    pub pac: Pac,
    pub ghosts: [Ghost; 4],
    pub hunting: HuntingTimer,
    lives: u32,
    score: u32,
    high_score: Score,
    high_score_beaten: bool,
    /// Scoring is off in attract mode
    pub scoring_enabled: bool,
    /// Value of the next ghost eaten with the current energizer
    ghost_bounty: u32,
    level_counter: Vec<BonusSymbol>,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        assert!(
            config.initial_lives >= 1,
            "A game needs at least one life, but initial_lives is {}",
            config.initial_lives
        );
        let variant = config.variant;
        let mut pac = Pac::new(variant);
        pac.immune = config.pac_immune;
        Self {
            config,
            level: None,
            pac,
            ghosts: GhostId::ALL.map(|id| Ghost::new(id, variant)),
            hunting: HuntingTimer::new(),
            lives: config.initial_lives,
            score: 0,
            high_score: Score::default(),
            high_score_beaten: false,
            scoring_enabled: false,
            ghost_bounty: FIRST_GHOST_BOUNTY,
            level_counter: Vec::new(),
            rng: Pcg32::seed_from_u64(config.seed),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn variant(&self) -> GameVariant {
        self.config.variant
    }

    /// Back to the state before the first level, keeping the high score
    pub fn reset(&mut self) {
        self.level = None;
        self.lives = self.config.initial_lives;
        self.score = 0;
        self.high_score_beaten = false;
        self.scoring_enabled = false;
        self.ghost_bounty = FIRST_GHOST_BOUNTY;
        self.level_counter.clear();
        self.hunting = HuntingTimer::new();
        self.pac.immune = self.config.pac_immune;
        log::debug!("Game model reset");
    }

    pub fn level(&self) -> Option<&GameLevel> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut GameLevel> {
        self.level.as_mut()
    }

    pub fn level_number(&self) -> Option<u32> {
        self.level.as_ref().map(|level| level.number)
    }

    pub fn set_level(&mut self, number: u32) {
        assert!(number >= 1, "Level number must be at least 1, but is: {number}");
        let level = GameLevel::new(self.config.variant, number, &mut self.rng);
        log::info!(
            "Level {} started (maze {}, bonus {:?})",
            number,
            level.maze_number,
            level.params.bonus_symbol
        );
        self.level_counter.push(level.params.bonus_symbol);
        if self.level_counter.len() > LEVEL_COUNTER_SIZE {
            self.level_counter.remove(0);
        }
        self.level = Some(level);
        self.hunting = HuntingTimer::new();
        self.ghost_bounty = FIRST_GHOST_BOUNTY;
        for ghost in &mut self.ghosts {
            ghost.dot_counter = 0;
        }
        self.publish(GameEvent::LevelStarted { number });
    }

    /// Bonus symbols of the most recent levels
    pub fn level_counter(&self) -> &[BonusSymbol] {
        &self.level_counter
    }

    /// Put Pac and the ghosts at their start positions, hidden
    pub fn reset_actors(&mut self) {
        self.pac.reset();
        self.pac.body.visible = false;
        if let Some(level) = self.level.as_mut() {
            let house = level.world.house();
            for ghost in &mut self.ghosts {
                ghost.reset(house);
                ghost.body.visible = false;
            }
            level.bonus.deactivate();
        }
    }

    pub fn show_actors(&mut self, visible: bool) {
        self.pac.body.visible = visible;
        self.show_ghosts(visible);
    }

    pub fn show_ghosts(&mut self, visible: bool) {
        for ghost in &mut self.ghosts {
            ghost.body.visible = visible;
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn lose_life(&mut self) {
        assert!(self.lives > 0, "No life left to lose");
        self.lives -= 1;
        log::info!("Life lost, {} left", self.lives);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> &Score {
        &self.high_score
    }

    pub fn set_high_score(&mut self, score: Score) {
        self.high_score = score;
    }

    /// Add points, granting the extra life and following with the high score
    pub fn add_points(&mut self, points: u32) {
        if !self.scoring_enabled {
            return;
        }
        let old = self.score;
        self.score += points;
        let threshold = self.config.extra_life_score;
        if old < threshold && self.score >= threshold {
            self.lives += 1;
            log::info!("Extra life at {} points, {} lives", self.score, self.lives);
            self.publish(GameEvent::ExtraLife { lives: self.lives });
        }
        if self.score > self.high_score.points {
            let level = self.level_number().unwrap_or(1);
            self.high_score = Score::new(self.score, level);
            if !self.high_score_beaten {
                self.high_score_beaten = true;
                log::info!("New high score: {} points", self.score);
                self.publish(GameEvent::HighScoreChanged {
                    points: self.score,
                    level,
                });
            }
        }
    }

    pub fn publish(&mut self, event: GameEvent) {
        log::trace!("Event: {event:?}");
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_level_complete(&self) -> bool {
        self.level.as_ref().is_some_and(GameLevel::is_complete)
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn start_hunting_phase(&mut self, phase: usize) {
        let Some(number) = self.level_number() else {
            return;
        };
        self.hunting.start_phase(number, phase);
        self.publish(GameEvent::HuntingPhaseStarted {
            phase,
            scatter: self.hunting.in_scatter_phase(),
        });
    }

    /// One tick of the hunting state
    pub fn update_hunting(&mut self, steer: Option<Direction>) -> StepOutcome {
        let outcome = self.update_player(steer);
        if self.is_level_complete() {
            return StepOutcome::LevelComplete;
        }
        if outcome != StepOutcome::Running {
            return outcome;
        }
        self.update_ghosts();
        self.update_bonus();
        self.advance_hunting();
        StepOutcome::Running
    }

    fn update_player(&mut self, steer: Option<Direction>) -> StepOutcome {
        let Some(level) = self.level.as_ref() else {
            return StepOutcome::Running;
        };
        self.pac.update(&level.world, &level.params, steer);
        self.pac.power_timer.advance();

        let pac_tile = self.pac.tile();
        let met_hunter = self
            .ghosts
            .iter()
            .any(|g| g.is(GhostState::HuntingPac) && g.tile() == pac_tile);
        if met_hunter && !self.pac.immune && !self.pac.has_power() {
            self.on_pac_killed();
            return StepOutcome::PacKilled;
        }

        let prey: Vec<GhostId> = self
            .ghosts
            .iter()
            .filter(|g| g.is(GhostState::Frightened) && g.tile() == pac_tile)
            .map(|g| g.id)
            .collect();
        if !prey.is_empty() {
            self.kill_ghosts(&prey);
            return StepOutcome::GhostsKilled;
        }

        if self.pac.is_power_fading() {
            log::debug!("Power fading");
            self.publish(GameEvent::PowerFading);
        }
        if self.pac.power_timer.has_expired() {
            self.on_power_lost();
        }

        self.eat_food();
        StepOutcome::Running
    }

    fn on_pac_killed(&mut self) {
        self.pac.dead = true;
        if let Some(level) = self.level.as_mut() {
            level.pause_cruise_elroy();
            level.house_rules.on_pac_killed();
        }
        log::info!("{} killed at {}", self.pac.body.name, self.pac.tile());
        self.publish(GameEvent::PacKilled);
    }

    /// Kill the given ghosts, doubling the bounty for each
    pub fn kill_ghosts(&mut self, prey: &[GhostId]) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let mut points = 0;
        let mut killed = Vec::with_capacity(prey.len());
        for &id in prey {
            let bounty = self.ghost_bounty;
            self.ghosts[id.index()].kill(level.world.house(), bounty);
            self.ghost_bounty *= 2;
            points += bounty;
            killed.push((id, bounty));
            log::debug!("{} killed, {} points", self.ghosts[id.index()].body.name, bounty);
        }
        level.num_ghosts_killed += prey.len() as u32;
        let all_killed = level.num_ghosts_killed == 16;
        for (ghost, bounty) in killed {
            self.publish(GameEvent::GhostEaten { ghost, points: bounty });
        }
        self.add_points(points);
        if all_killed {
            log::info!("All ghosts killed, {} bonus points", ALL_GHOSTS_KILLED_POINTS);
            self.publish(GameEvent::AllGhostsKilled);
            self.add_points(ALL_GHOSTS_KILLED_POINTS);
        }
    }

    fn on_power_lost(&mut self) {
        log::debug!("Power lost");
        self.pac.power_timer.reset(0);
        self.hunting.start();
        for ghost in &mut self.ghosts {
            if ghost.is(GhostState::Frightened) {
                ghost.set_state(GhostState::HuntingPac);
            }
        }
        self.publish(GameEvent::PowerLost);
    }

    fn eat_food(&mut self) {
        let tile = self.pac.tile();
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if !level.world.contains_food(tile) {
            self.pac.starving_ticks += 1;
            return;
        }
        let energizer = level.world.is_energizer_tile(tile);
        level.world.remove_food(tile);
        self.pac.starving_ticks = 0;
        self.pac.rest(if energizer {
            ENERGIZER_RESTING_TICKS
        } else {
            PELLET_RESTING_TICKS
        });
        level.check_cruise_elroy();
        level.house_rules.on_food_eaten(&mut self.ghosts);

        let bonus_reached = BONUS_FOOD_COUNTS.contains(&level.world.eaten_food_count());
        let bonus_event = if bonus_reached {
            Some(level.bonus.activate(level.params.bonus_symbol, &level.world, &mut self.rng))
        } else {
            None
        };
        let frightened_seconds = level.params.frightened_seconds;

        if energizer {
            self.publish(GameEvent::EnergizerEaten { tile });
            self.add_points(ENERGIZER_VALUE);
            self.ghost_bounty = FIRST_GHOST_BOUNTY;
            if frightened_seconds > 0 {
                self.on_power_gained(frightened_seconds);
            }
        } else {
            self.publish(GameEvent::PelletEaten { tile });
            self.add_points(PELLET_VALUE);
        }
        if let Some(event) = bonus_event {
            self.publish(event);
        }
    }

    fn on_power_gained(&mut self, seconds: u32) {
        self.hunting.stop();
        self.pac.power_timer.reset_seconds(seconds as u64);
        self.pac.power_timer.start();
        if let Some(level) = self.level.as_ref() {
            for ghost in &mut self.ghosts {
                if ghost.is(GhostState::HuntingPac) {
                    ghost.set_state(GhostState::Frightened);
                    ghost.body.force_turning_back(&level.world);
                }
            }
        }
        log::debug!("Power for {seconds} seconds");
        self.publish(GameEvent::PowerStarted);
    }

    fn ghost_context(&self, level: &GameLevel) -> GhostContext {
        GhostContext {
            pac_tile: self.pac.tile(),
            pac_dir: self.pac.body.move_dir,
            red_tile: self.ghosts[GhostId::Red.index()].tile(),
            chasing: self.hunting.in_chase_phase(),
            params: level.params,
            cruise_elroy: level.cruise_elroy,
        }
    }

    /// Release a ghost if the house rules say so, then move all ghosts
    fn update_ghosts(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if let Some((id, reason)) = level.house_rules.check_release(&self.ghosts, &mut self.pac.starving_ticks) {
            log::info!("Releasing {} ({:?})", self.ghosts[id.index()].body.name, reason);
            if id == GhostId::Orange {
                level.resume_cruise_elroy();
            }
            let event = self.ghosts[id.index()].unlock();
            self.events.push(event);
        }
        let Some(level) = self.level.as_ref() else {
            return;
        };
        let ctx = self.ghost_context(level);
        for ghost in &mut self.ghosts {
            if let Some(event) = ghost.update(&level.world, &ctx, &mut self.rng) {
                self.events.push(event);
            }
        }
    }

    /// While the kill pause lasts only ghosts already on their way home move
    pub fn update_ghosts_returning(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        let ctx = self.ghost_context(level);
        for ghost in &mut self.ghosts {
            let returning = matches!(ghost.state, GhostState::Dead | GhostState::EnteringHouse);
            if returning && ghost.bounty == 0 {
                if let Some(event) = ghost.update(&level.world, &ctx, &mut self.rng) {
                    self.events.push(event);
                }
            }
        }
    }

    /// Ghosts eaten during the kill pause stop showing their bounty
    pub fn end_ghost_kill_pause(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.bounty = 0;
        }
    }

    fn update_bonus(&mut self) {
        let pac_tile = self.pac.tile();
        let Some(level) = self.level.as_mut() else {
            return;
        };
        let Some(event) = level.bonus.update(&level.world, pac_tile) else {
            return;
        };
        if let GameEvent::BonusEaten { points, .. } = event {
            self.add_points(points);
        }
        self.publish(event);
    }

    fn advance_hunting(&mut self) {
        let Some(level) = self.level.as_ref() else {
            return;
        };
        let Some(phase) = self.hunting.advance(level.number) else {
            return;
        };
        for ghost in &mut self.ghosts {
            if matches!(ghost.state, GhostState::HuntingPac | GhostState::Frightened) {
                ghost.body.force_turning_back(&level.world);
            }
        }
        self.publish(GameEvent::HuntingPhaseStarted {
            phase,
            scatter: self.hunting.in_scatter_phase(),
        });
    }

    /// Freeze everything when the player dies
    pub fn on_pac_dying(&mut self) {
        self.pac.body.speed = 0.0;
        self.pac.power_timer.reset(0);
        self.hunting.stop();
        for ghost in &mut self.ghosts {
            if ghost.is(GhostState::Frightened) {
                ghost.set_state(GhostState::HuntingPac);
            }
        }
        if let Some(level) = self.level.as_mut() {
            level.bonus.deactivate();
        }
    }

    /// Stop the actors once the last food is eaten
    pub fn on_level_complete(&mut self) {
        self.hunting.stop();
        self.pac.body.speed = 0.0;
        self.pac.power_timer.reset(0);
        self.show_ghosts(false);
        if let Some(level) = self.level.as_mut() {
            level.bonus.deactivate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FPS;
    use crate::sim::timer::TimerState;
    use crate::tile_center;
    use glam::IVec2;
    use proptest::prelude::*;

    fn running_game() -> Game {
        let mut game = Game::new(GameConfig::default());
        game.set_level(1);
        game.reset_actors();
        game.show_actors(true);
        game.scoring_enabled = true;
        game.drain_events();
        game
    }

    fn place_pac(game: &mut Game, tile: IVec2, dir: Direction) {
        game.pac.body.place_at(tile_center(tile));
        game.pac.body.set_both_dirs(dir);
    }

    fn level(game: &mut Game) -> &mut GameLevel {
        game.level_mut().expect("level")
    }

    fn place_ghost(game: &mut Game, id: GhostId, tile: IVec2, state: GhostState) {
        let ghost = &mut game.ghosts[id.index()];
        ghost.body.place_at(tile_center(tile));
        ghost.set_state(state);
    }

    #[test]
    fn test_eating_pellet() {
        let mut game = running_game();
        place_pac(&mut game, IVec2::new(6, 8), Direction::Left);
        assert_eq!(game.update_hunting(None), StepOutcome::Running);
        assert_eq!(game.score(), PELLET_VALUE);
        assert_eq!(game.pac.resting_ticks, PELLET_RESTING_TICKS);
        assert_eq!(game.pac.starving_ticks, 0);
        assert_eq!(game.level().map(|l| l.world.food_remaining()), Some(243));
        assert!(game.drain_events().contains(&GameEvent::PelletEaten { tile: IVec2::new(6, 8) }));
    }

    #[test]
    fn test_starving_counts_up_without_food() {
        let mut game = running_game();
        place_pac(&mut game, IVec2::new(13, 26), Direction::Left);
        game.update_hunting(None);
        assert_eq!(game.pac.starving_ticks, 1);
    }

    #[test]
    fn test_energizer_frightens_hunting_ghosts() {
        let mut game = running_game();
        game.start_hunting_phase(0);
        game.ghosts[0].unlock();
        place_pac(&mut game, IVec2::new(1, 6), Direction::Up);
        game.update_hunting(None);

        assert_eq!(game.score(), ENERGIZER_VALUE);
        assert!(game.pac.has_power());
        assert_eq!(game.pac.power_timer.duration(), 6 * FPS);
        assert_eq!(game.pac.power_timer.remaining(), 6 * FPS);
        assert_eq!(game.pac.resting_ticks, ENERGIZER_RESTING_TICKS);
        assert_eq!(game.ghost(GhostId::Red).state, GhostState::Frightened);
        // Pink is released by its dot counter, never frightened in the house
        assert_eq!(game.ghost(GhostId::Pink).state, GhostState::LeavingHouse);
        assert_eq!(game.hunting.timer().state(), TimerState::Stopped);
        assert!(game.drain_events().contains(&GameEvent::PowerStarted));
    }

    #[test]
    fn test_power_fades_then_ends() {
        let mut game = running_game();
        game.pac.immune = true;
        game.start_hunting_phase(0);
        game.ghosts[0].unlock();
        place_pac(&mut game, IVec2::new(1, 6), Direction::Up);

        let mut events = Vec::new();
        for _ in 0..8 * 60 {
            game.update_hunting(None);
            events.extend(game.drain_events());
            if events.contains(&GameEvent::PowerLost) {
                break;
            }
        }
        let fading = events.iter().position(|e| *e == GameEvent::PowerFading);
        let lost = events.iter().position(|e| *e == GameEvent::PowerLost);
        assert!(fading.is_some() && lost.is_some());
        assert!(fading < lost);
        assert!(!game.pac.has_power());
        assert!(game.hunting.is_running());
        assert!(game.ghosts.iter().all(|g| !g.is(GhostState::Frightened)));
    }

    #[test]
    fn test_short_power_still_fades() {
        let mut game = Game::new(GameConfig::default());
        game.set_level(9);
        game.reset_actors();
        game.show_actors(true);
        game.pac.immune = true;
        game.start_hunting_phase(0);
        assert_eq!(game.level().expect("level").params.frightened_seconds, 1);
        place_pac(&mut game, IVec2::new(1, 6), Direction::Up);

        let mut events = Vec::new();
        for _ in 0..5 * 60 {
            game.update_hunting(None);
            events.extend(game.drain_events());
        }
        let count = |event: GameEvent| events.iter().filter(|e| **e == event).count();
        assert_eq!(count(GameEvent::PowerStarted), 1);
        assert_eq!(count(GameEvent::PowerFading), 1);
        assert_eq!(count(GameEvent::PowerLost), 1);
    }

    #[test]
    fn test_bounty_sequence() {
        let mut game = running_game();
        place_pac(&mut game, IVec2::new(6, 8), Direction::Left);
        level(&mut game).world.remove_food(IVec2::new(6, 8));
        for id in GhostId::ALL {
            place_ghost(&mut game, id, IVec2::new(6, 8), GhostState::Frightened);
        }
        assert_eq!(game.update_hunting(None), StepOutcome::GhostsKilled);
        let bounties: Vec<u32> = game.ghosts.iter().map(|g| g.bounty).collect();
        assert_eq!(bounties, vec![200, 400, 800, 1600]);
        assert_eq!(game.score(), 3000);
        assert!(game.ghosts.iter().all(|g| g.is(GhostState::Dead)));
        game.end_ghost_kill_pause();
        assert!(game.ghosts.iter().all(|g| g.bounty == 0));
    }

    #[test]
    fn test_energizer_resets_bounty() {
        let mut game = running_game();
        place_pac(&mut game, IVec2::new(6, 8), Direction::Left);
        level(&mut game).world.remove_food(IVec2::new(6, 8));
        place_ghost(&mut game, GhostId::Red, IVec2::new(6, 8), GhostState::Frightened);
        game.update_hunting(None);
        assert_eq!(game.ghost(GhostId::Red).bounty, 200);

        place_pac(&mut game, IVec2::new(26, 6), Direction::Up);
        game.update_hunting(None);
        place_pac(&mut game, IVec2::new(21, 8), Direction::Left);
        level(&mut game).world.remove_food(IVec2::new(21, 8));
        place_ghost(&mut game, GhostId::Pink, IVec2::new(21, 8), GhostState::Frightened);
        game.update_hunting(None);
        assert_eq!(game.ghost(GhostId::Pink).bounty, 200);
    }

    #[test]
    fn test_all_ghosts_killed_bonus_and_extra_life() {
        let mut game = running_game();
        level(&mut game).num_ghosts_killed = 12;
        place_pac(&mut game, IVec2::new(6, 8), Direction::Left);
        level(&mut game).world.remove_food(IVec2::new(6, 8));
        for id in GhostId::ALL {
            place_ghost(&mut game, id, IVec2::new(6, 8), GhostState::Frightened);
        }
        game.update_hunting(None);
        assert_eq!(game.score(), 3000 + ALL_GHOSTS_KILLED_POINTS);
        assert_eq!(game.lives(), INITIAL_LIVES + 1);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::AllGhostsKilled));
        assert!(events.contains(&GameEvent::ExtraLife { lives: INITIAL_LIVES + 1 }));
    }

    #[test]
    fn test_hunting_ghost_kills_pac() {
        let mut game = running_game();
        level(&mut game).cruise_elroy = 1;
        place_pac(&mut game, IVec2::new(6, 8), Direction::Left);
        place_ghost(&mut game, GhostId::Red, IVec2::new(6, 8), GhostState::HuntingPac);
        assert_eq!(game.update_hunting(None), StepOutcome::PacKilled);
        assert!(game.pac.dead);
        let level = game.level().expect("level");
        assert_eq!(level.cruise_elroy, -1);
        assert!(level.house_rules.global_counter_enabled);
        assert_eq!(level.house_rules.global_counter, 0);
    }

    #[test]
    fn test_immune_pac_survives() {
        let mut game = running_game();
        game.pac.immune = true;
        place_pac(&mut game, IVec2::new(6, 8), Direction::Left);
        place_ghost(&mut game, GhostId::Red, IVec2::new(6, 8), GhostState::HuntingPac);
        assert_eq!(game.update_hunting(None), StepOutcome::Running);
        assert!(!game.pac.dead);
    }

    #[test]
    fn test_extra_life_only_once() {
        let mut game = running_game();
        game.add_points(9_990);
        assert_eq!(game.lives(), INITIAL_LIVES);
        game.add_points(20);
        assert_eq!(game.lives(), INITIAL_LIVES + 1);
        game.add_points(10_000);
        game.add_points(50_000);
        assert_eq!(game.lives(), INITIAL_LIVES + 1);
    }

    #[test]
    fn test_scoring_disabled_in_attract_mode() {
        let mut game = running_game();
        game.scoring_enabled = false;
        game.add_points(500);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_high_score_follows_score() {
        let mut game = running_game();
        game.set_high_score(Score::new(100, 1));
        game.add_points(50);
        assert_eq!(game.high_score().points, 100);
        game.add_points(60);
        assert_eq!(game.high_score().points, 110);
        game.add_points(10);
        assert_eq!(game.high_score().points, 120);
        let changes = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::HighScoreChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_level_complete_when_food_gone() {
        let mut game = running_game();
        let tiles: Vec<IVec2> = {
            let world = &game.level().expect("level").world;
            world.tiles_iter().filter(|&t| world.contains_food(t)).collect()
        };
        let (last, rest) = tiles.split_last().expect("food");
        for tile in rest {
            level(&mut game).world.remove_food(*tile);
        }
        place_pac(&mut game, *last, Direction::Left);
        assert_eq!(game.update_hunting(None), StepOutcome::LevelComplete);
    }

    #[test]
    fn test_bonus_appears_after_70_and_170_pellets() {
        let mut game = running_game();
        let tiles: Vec<IVec2> = {
            let world = &game.level().expect("level").world;
            world
                .tiles_iter()
                .filter(|&t| world.contains_food(t) && !world.is_energizer_tile(t))
                .collect()
        };
        let bonus_activated = |game: &mut Game| {
            game.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::BonusActivated { .. }))
        };
        for tile in &tiles[..69] {
            level(&mut game).world.remove_food(*tile);
        }
        place_pac(&mut game, tiles[69], Direction::Left);
        game.update_hunting(None);
        assert_eq!(game.level().expect("level").world.eaten_food_count(), 70);
        assert!(bonus_activated(&mut game));

        for tile in &tiles[70..169] {
            level(&mut game).world.remove_food(*tile);
        }
        place_pac(&mut game, tiles[169], Direction::Left);
        game.update_hunting(None);
        assert_eq!(game.level().expect("level").world.eaten_food_count(), 170);
        assert!(bonus_activated(&mut game));
    }

    #[test]
    fn test_phase_change_reverses_ghosts() {
        let mut game = running_game();
        game.start_hunting_phase(0);
        game.ghosts[0].unlock();
        place_ghost(&mut game, GhostId::Red, IVec2::new(6, 8), GhostState::HuntingPac);
        game.ghosts[0].body.set_both_dirs(Direction::Right);
        game.hunting.start_phase(1, 6);
        for _ in 0..crate::sim::hunting::durations(1)[6] {
            game.advance_hunting();
        }
        assert_eq!(game.ghost(GhostId::Red).body.move_dir, Direction::Right);
        game.advance_hunting();
        assert_eq!(game.hunting.phase(), 7);
        assert_eq!(game.ghost(GhostId::Red).body.move_dir, Direction::Left);
    }

    #[test]
    #[should_panic(expected = "Level number must be at least 1")]
    fn test_level_zero_rejected() {
        let mut game = Game::new(GameConfig::default());
        game.set_level(0);
    }

    #[test]
    #[should_panic(expected = "No life left to lose")]
    fn test_cannot_lose_life_without_lives() {
        let mut game = Game::new(GameConfig {
            initial_lives: 1,
            ..GameConfig::default()
        });
        game.lose_life();
        game.lose_life();
    }

    #[test]
    #[should_panic(expected = "at least one life")]
    fn test_game_without_lives_rejected() {
        Game::new(GameConfig {
            initial_lives: 0,
            ..GameConfig::default()
        });
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_single_extra_life(
            gains in prop::collection::vec(
                prop::sample::select(vec![10u32, 50, 100, 200, 400, 800, 1600, 5000, 12_000]),
                0..80,
            )
        ) {
            let mut game = running_game();
            let mut last = 0;
            for points in &gains {
                game.add_points(*points);
                prop_assert!(game.score() >= last);
                prop_assert!(game.high_score().points >= game.score());
                last = game.score();
            }
            let total: u32 = gains.iter().sum();
            prop_assert_eq!(game.score(), total);
            let expected = INITIAL_LIVES + u32::from(total >= EXTRA_LIFE_SCORE);
            prop_assert_eq!(game.lives(), expected);
        }
    }
}
