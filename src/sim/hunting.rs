//! Scatter/chase scheduling
//!
//! Eight phases alternate between scattering (even) and chasing (odd). The
//! last phase lasts forever. The durations only depend on the level number.

use serde::{Deserialize, Serialize};

use super::timer::{INDEFINITE, TickTimer};
use crate::sec_to_ticks;

pub const NUM_PHASES: usize = 8;

const fn s(seconds: u64) -> u64 {
    sec_to_ticks(seconds)
}

#[rustfmt::skip]
const DURATIONS: [[u64; NUM_PHASES]; 3] = [
    [s(7), s(20), s(7), s(20), s(5), s(20),   s(5), INDEFINITE],
    [s(7), s(20), s(7), s(20), s(5), s(1033), 1,    INDEFINITE],
    [s(5), s(20), s(5), s(20), s(5), s(1037), 1,    INDEFINITE],
];

/// Phase durations in ticks for a level
pub fn durations(level_number: u32) -> &'static [u64; NUM_PHASES] {
    match level_number {
        1 => &DURATIONS[0],
        2..=4 => &DURATIONS[1],
        _ => &DURATIONS[2],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntingTimer {
    phase: usize,
    timer: TickTimer,
}

impl Default for HuntingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl HuntingTimer {
    pub fn new() -> Self {
        Self {
            phase: 0,
            timer: TickTimer::new("HuntingTimer"),
        }
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn in_scatter_phase(&self) -> bool {
        self.phase % 2 == 0
    }

    pub fn in_chase_phase(&self) -> bool {
        !self.in_scatter_phase()
    }

    /// Position among scatter (or chase) phases, 0..=3
    pub fn scatter_or_chase_index(&self) -> usize {
        self.phase / 2
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// Start a phase with the duration the level prescribes
    pub fn start_phase(&mut self, level_number: u32, phase: usize) {
        assert!(phase < NUM_PHASES, "Hunting phase {phase} out of range");
        self.phase = phase;
        self.timer.reset(durations(level_number)[phase]);
        self.timer.start();
        log::debug!(
            "Hunting phase {} ({}) started, {} ticks",
            phase,
            if self.in_scatter_phase() { "scatter" } else { "chase" },
            self.timer.remaining()
        );
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Advance the current phase. Returns the new phase when the current one
    /// ended; the caller reverses the ghosts.
    pub fn advance(&mut self, level_number: u32) -> Option<usize> {
        if self.timer.advance() && self.phase + 1 < NUM_PHASES {
            self.start_phase(level_number, self.phase + 1);
            return Some(self.phase);
        }
        None
    }
}
