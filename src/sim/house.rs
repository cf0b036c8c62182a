//! Ghost-house release policy
//!
//! Locked ghosts are released one at a time in id order. A ghost leaves when
//! its private dot counter (or, after the player lost a life, the global dot
//! counter) reaches its limit, or when the player has not eaten for too long.

use serde::{Deserialize, Serialize};

use super::ghost::{Ghost, GhostId, GhostState};
use crate::sec_to_ticks;

/// Global counter value at which the orange ghost forces the counter off
const GLOBAL_COUNTER_LIMIT: u32 = 32;

/// Why a ghost was released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseReason {
    Immediately,
    GlobalDotCounter,
    PrivateDotCounter,
    Starving,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseRules {
    pub global_counter: u32,
    pub global_counter_enabled: bool,
    global_limits: [u32; 4],
    private_limits: [u32; 4],
    /// Ticks without food after which the next ghost is released
    starving_limit: u64,
}

impl HouseRules {
    pub fn new(level_number: u32) -> Self {
        let private_limits = match level_number {
            1 => [0, 0, 30, 60],
            2 => [0, 0, 0, 50],
            _ => [0, 0, 0, 0],
        };
        Self {
            global_counter: 0,
            global_counter_enabled: false,
            global_limits: [u32::MAX, 7, 17, u32::MAX],
            private_limits,
            starving_limit: sec_to_ticks(if level_number < 5 { 4 } else { 3 }),
        }
    }

    pub fn private_limit(&self, ghost: GhostId) -> u32 {
        self.private_limits[ghost.index()]
    }

    pub fn global_limit(&self, ghost: GhostId) -> u32 {
        self.global_limits[ghost.index()]
    }

    pub fn starving_limit(&self) -> u64 {
        self.starving_limit
    }

    /// After losing a life the global counter takes over
    pub fn on_pac_killed(&mut self) {
        self.global_counter = 0;
        self.global_counter_enabled = true;
        log::debug!("Global dot counter reset and enabled");
    }

    /// Count an eaten pellet or energizer
    pub fn on_food_eaten(&mut self, ghosts: &mut [Ghost; 4]) {
        if self.global_counter_enabled {
            if ghosts[GhostId::Orange.index()].is(GhostState::Locked)
                && self.global_counter == GLOBAL_COUNTER_LIMIT
            {
                self.global_counter_enabled = false;
                self.global_counter = 0;
                log::debug!("Global dot counter disabled and reset, orange ghost still locked");
            } else {
                self.global_counter += 1;
            }
        } else if let Some(ghost) = ghosts
            .iter_mut()
            .find(|g| g.id != GhostId::Red && g.is(GhostState::Locked))
        {
            ghost.dot_counter += 1;
        }
    }

    /// Find the ghost to release this tick, if any. Resets `starving_ticks`
    /// when starvation forces the release.
    pub fn check_release(&self, ghosts: &[Ghost; 4], starving_ticks: &mut u64) -> Option<(GhostId, ReleaseReason)> {
        let ghost = ghosts.iter().find(|g| g.is(GhostState::Locked))?;
        let id = ghost.id;
        if id == GhostId::Red {
            return Some((id, ReleaseReason::Immediately));
        }
        if self.global_counter_enabled {
            if self.global_counter >= self.global_limit(id) {
                return Some((id, ReleaseReason::GlobalDotCounter));
            }
        } else if ghost.dot_counter >= self.private_limit(id) {
            return Some((id, ReleaseReason::PrivateDotCounter));
        }
        if *starving_ticks >= self.starving_limit {
            *starving_ticks = 0;
            return Some((id, ReleaseReason::Starving));
        }
        None
    }
}
