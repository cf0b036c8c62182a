//! Sound effects derived from simulation events
//!
//! The simulation knows nothing about playback. The host drains the event
//! queue after every tick, maps each event to a [`SoundEffect`] and hands it
//! to a [`SoundSink`].

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Coin inserted
    Credit,
    /// Start jingle of a new game
    GameReady,
    /// Pellet or energizer eaten
    Munch,
    /// Ghost siren, 1-4, gets faster with later hunting phases
    Siren(u8),
    /// Ghosts are frightened
    PowerSiren,
    PowerEnd,
    GhostEaten,
    BonusEaten,
    ExtraLife,
    PacDeath,
    LevelComplete,
    Intermission,
    HighScore,
    GameOver,
}

/// Siren for a hunting phase index (0-7)
pub fn siren_for_phase(phase: usize) -> u8 {
    match phase {
        0 | 1 => 1,
        2 | 3 => 2,
        4 | 5 => 3,
        _ => 4,
    }
}

/// Sound played in response to an event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    let effect = match event {
        GameEvent::CreditAdded { .. } => SoundEffect::Credit,
        GameEvent::GameStarted => SoundEffect::GameReady,
        GameEvent::PelletEaten { .. } | GameEvent::EnergizerEaten { .. } => SoundEffect::Munch,
        // The siren only changes when a scatter phase starts
        GameEvent::HuntingPhaseStarted { phase, scatter: true } => {
            SoundEffect::Siren(siren_for_phase(*phase))
        }
        GameEvent::PowerStarted => SoundEffect::PowerSiren,
        GameEvent::PowerLost => SoundEffect::PowerEnd,
        GameEvent::GhostEaten { .. } => SoundEffect::GhostEaten,
        GameEvent::BonusEaten { .. } => SoundEffect::BonusEaten,
        GameEvent::ExtraLife { .. } => SoundEffect::ExtraLife,
        GameEvent::PacDyingAnimation => SoundEffect::PacDeath,
        GameEvent::LevelCompleted { .. } => SoundEffect::LevelComplete,
        GameEvent::IntermissionStarted { .. } => SoundEffect::Intermission,
        GameEvent::HighScoreChanged { .. } => SoundEffect::HighScore,
        GameEvent::GameOver { .. } => SoundEffect::GameOver,
        _ => return None,
    };
    Some(effect)
}

/// Receives the sound effects of a running game
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);

    /// Silence everything (level end, Pac death, game over)
    fn stop_all(&mut self) {}
}

/// Discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Logs every sound at debug level, used by the headless runner
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    muted: bool,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        if !self.muted {
            log::debug!("Sound: {:?}", effect);
        }
    }

    fn stop_all(&mut self) {
        log::trace!("Sound: stop all");
    }
}

/// Collects played sounds, handy in tests and tools
impl SoundSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Events after which all running sounds stop
pub fn stops_all_sounds(event: &GameEvent) -> bool {
    matches!(
        event,
        GameEvent::PacKilled | GameEvent::LevelCompleted { .. } | GameEvent::GameOver { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_food_munches() {
        let tile = IVec2::new(1, 4);
        assert_eq!(sound_for(&GameEvent::PelletEaten { tile }), Some(SoundEffect::Munch));
        assert_eq!(sound_for(&GameEvent::EnergizerEaten { tile }), Some(SoundEffect::Munch));
    }

    #[test]
    fn test_siren_follows_scatter_phases() {
        let siren = |phase| sound_for(&GameEvent::HuntingPhaseStarted { phase, scatter: true });
        assert_eq!(siren(0), Some(SoundEffect::Siren(1)));
        assert_eq!(siren(2), Some(SoundEffect::Siren(2)));
        assert_eq!(siren(6), Some(SoundEffect::Siren(4)));
        assert_eq!(
            sound_for(&GameEvent::HuntingPhaseStarted { phase: 1, scatter: false }),
            None
        );
    }

    #[test]
    fn test_silent_events() {
        assert_eq!(sound_for(&GameEvent::BonusExpired), None);
        assert_eq!(sound_for(&GameEvent::PacKilled), None);
        assert!(stops_all_sounds(&GameEvent::PacKilled));
        assert!(!stops_all_sounds(&GameEvent::PowerStarted));
    }

    #[test]
    fn test_vec_sink_records() {
        let mut sink: Vec<SoundEffect> = Vec::new();
        sink.play(SoundEffect::Credit);
        sink.stop_all();
        sink.play(SoundEffect::GameReady);
        assert_eq!(sink, vec![SoundEffect::Credit, SoundEffect::GameReady]);
    }
}
