//! The player

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::creature::{Creature, MoveResult};
use super::direction::Direction;
use super::level::{GameVariant, LevelParams, speed};
use super::timer::TickTimer;
use super::world::World;
use crate::consts::FPS;
use crate::half_tile_right_of;

/// Ticks before the end of power when the ghosts start flashing
pub const POWER_FADING_TICKS: u64 = 2 * FPS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pac {
    pub body: Creature,
    /// Ticks since food was last eaten
    pub starving_ticks: u64,
    /// Ticks left without moving after eating
    pub resting_ticks: u32,
    pub power_timer: TickTimer,
    pub dead: bool,
    /// Cheat: hunting ghosts do not kill
    pub immune: bool,
}

impl Pac {
    pub fn new(variant: GameVariant) -> Self {
        Self {
            body: Creature::new(variant.player_name()),
            starving_ticks: 0,
            resting_ticks: 0,
            power_timer: TickTimer::new("PacPower"),
            dead: false,
            immune: false,
        }
    }

    pub fn start_tile() -> IVec2 {
        IVec2::new(13, 26)
    }

    pub fn reset(&mut self) {
        self.body.place_at(half_tile_right_of(Self::start_tile()));
        self.body.set_both_dirs(Direction::Left);
        self.body.target_tile = None;
        self.body.speed = 0.0;
        self.body.visible = true;
        self.starving_ticks = 0;
        self.resting_ticks = 0;
        self.power_timer.reset(0);
        self.dead = false;
    }

    pub fn tile(&self) -> IVec2 {
        self.body.tile()
    }

    pub fn has_power(&self) -> bool {
        self.power_timer.is_running()
    }

    pub fn rest(&mut self, ticks: u32) {
        self.resting_ticks = ticks;
    }

    /// Apply the steering request and move, unless resting
    pub fn update(&mut self, world: &World, params: &LevelParams, steer: Option<Direction>) -> MoveResult {
        if let Some(dir) = steer {
            self.body.wish_dir = dir;
        }
        if self.resting_ticks > 0 {
            self.resting_ticks -= 1;
            return MoveResult::default();
        }
        let percentage = if self.has_power() {
            params.player_speed_powered
        } else {
            params.player_speed
        };
        self.body.speed = speed(percentage);
        self.body.try_moving(world)
    }

    /// Remaining power reached the fading threshold. Short power times start
    /// fading on their first tick.
    pub fn is_power_fading(&self) -> bool {
        let threshold = POWER_FADING_TICKS.min(self.power_timer.duration().saturating_sub(1));
        self.has_power() && self.power_timer.remaining() == threshold
    }
}
