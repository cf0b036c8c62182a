//! Tick-counting timer
//!
//! Every duration in the simulation is measured in ticks of the fixed 60 Hz
//! timestep. A timer is either finite or [`INDEFINITE`]; the latter never
//! expires on its own and can only be ended with [`TickTimer::expire`].

use serde::{Deserialize, Serialize};

use crate::consts::FPS;

/// Duration sentinel for timers that never run out
pub const INDEFINITE: u64 = u64::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Ready,
    Running,
    Stopped,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickTimer {
    name: String,
    state: TimerState,
    duration: u64,
    tick: u64,
}

impl TickTimer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: TimerState::Ready,
            duration: INDEFINITE,
            tick: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Put the timer back into the ready state with a new duration
    pub fn reset(&mut self, duration: u64) {
        self.state = TimerState::Ready;
        self.duration = duration;
        self.tick = 0;
        log::trace!("{} reset to {}", self.name, self.describe());
    }

    pub fn reset_seconds(&mut self, seconds: u64) {
        self.reset(seconds * FPS);
    }

    pub fn reset_indefinite(&mut self) {
        self.reset(INDEFINITE);
    }

    /// Start or resume. Starting a running or expired timer does nothing.
    pub fn start(&mut self) {
        match self.state {
            TimerState::Ready | TimerState::Stopped => {
                self.state = TimerState::Running;
                log::trace!("{} started", self.name);
            }
            TimerState::Running | TimerState::Expired => {}
        }
    }

    pub fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Stopped;
            log::trace!("{} stopped at tick {}", self.name, self.tick);
        }
    }

    /// Advance one tick. Returns `true` only on the tick the timer expires.
    pub fn advance(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        if self.duration != INDEFINITE && self.tick >= self.duration {
            return self.expire();
        }
        self.tick += 1;
        false
    }

    /// Force the timer into the expired state. Returns `true` if it was not
    /// already expired.
    pub fn expire(&mut self) -> bool {
        if self.state == TimerState::Expired {
            return false;
        }
        self.state = TimerState::Expired;
        log::trace!("{} expired at tick {}", self.name, self.tick);
        true
    }

    pub fn has_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.state == TimerState::Stopped
    }

    pub fn is_indefinite(&self) -> bool {
        self.duration == INDEFINITE
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Ticks elapsed since the last reset
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks left, or [`INDEFINITE`]
    pub fn remaining(&self) -> u64 {
        if self.is_indefinite() {
            INDEFINITE
        } else {
            self.duration.saturating_sub(self.tick)
        }
    }

    /// True exactly on the tick at which `seconds` have elapsed
    pub fn at_second(&self, seconds: f32) -> bool {
        self.tick == (seconds * FPS as f32).round() as u64
    }

    pub fn between_seconds(&self, begin: f32, end: f32) -> bool {
        let t = self.tick as f32 / FPS as f32;
        begin <= t && t < end
    }

    fn describe(&self) -> String {
        if self.is_indefinite() {
            "indefinite".to_string()
        } else {
            format!("{} ticks", self.duration)
        }
    }
}
