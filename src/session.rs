//! Host driver
//!
//! Owns the game state together with its collaborators. Everything with side
//! effects (sound, high score storage) happens here, between ticks, driven by
//! the events the simulation published.

use crate::audio::{SoundSink, sound_for, stops_all_sounds};
use crate::highscores::Score;
use crate::persistence::HighScoreStore;
use crate::sim::{GameConfig, GameEvent, GameState, Snapshot, TickInput, tick};

pub struct Session<S: HighScoreStore, K: SoundSink> {
    state: GameState,
    store: S,
    sink: K,
    /// Record as last loaded or saved
    record: Score,
    events: Vec<GameEvent>,
}

impl<S: HighScoreStore, K: SoundSink> Session<S, K> {
    /// Create a game and load the stored record of its variant
    pub fn new(config: GameConfig, store: S, sink: K) -> Self {
        let mut state = GameState::new(config);
        let record = match store.load(config.variant) {
            Ok(Some(record)) => {
                log::info!("High score of {}: {}", config.variant.player_name(), record.points);
                record
            }
            Ok(None) => Score::default(),
            Err(e) => {
                log::warn!("Could not load high score: {e}");
                Score::default()
            }
        };
        state.game.set_high_score(record);
        Self {
            state,
            store,
            sink,
            record,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn record(&self) -> &Score {
        &self.record
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Run one tick and react to its events. Returns the events of the tick.
    pub fn advance(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input);
        let events = self.state.drain_events();
        for event in &events {
            self.dispatch(event);
        }
        self.events = events;
        &self.events
    }

    fn dispatch(&mut self, event: &GameEvent) {
        if stops_all_sounds(event) {
            self.sink.stop_all();
        }
        if let Some(effect) = sound_for(event) {
            self.sink.play(effect);
        }
        if let GameEvent::GameOver { points, level } = *event {
            self.save_if_record(Score::new(points, level));
        }
    }

    fn save_if_record(&mut self, score: Score) {
        if !score.beats(&self.record) {
            return;
        }
        let score = score.dated_now();
        let variant = self.state.game.variant();
        match self.store.save(variant, &score) {
            Ok(()) => {
                log::info!("New {} record: {} points", variant.player_name(), score.points);
                self.record = score;
            }
            Err(e) => log::warn!("High score not saved: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::persistence::{MemoryStore, PersistError};
    use crate::sim::{GamePhase, GameVariant, GhostId, GhostState};
    use crate::tile_center;

    type TestSession = Session<MemoryStore, Vec<SoundEffect>>;

    fn session(store: MemoryStore) -> TestSession {
        let config = GameConfig {
            initial_lives: 1,
            ..GameConfig::default()
        };
        Session::new(config, store, Vec::new())
    }

    fn run_until(session: &mut TestSession, phase: GamePhase, limit: u64) {
        for _ in 0..limit {
            session.advance(&TickInput::default());
            if session.state().phase() == phase {
                return;
            }
        }
        panic!("{phase:?} not reached, in {:?}", session.state().phase());
    }

    fn start_game(session: &mut TestSession) {
        session.advance(&TickInput {
            add_credit: true,
            ..TickInput::default()
        });
        session.advance(&TickInput {
            start_game: true,
            ..TickInput::default()
        });
        run_until(session, GamePhase::Hunting, 400);
    }

    fn kill_pac(session: &mut TestSession) {
        let game = &mut session.state_mut().game;
        game.pac.rest(1);
        let tile = game.pac.tile();
        let red = &mut game.ghosts[GhostId::Red.index()];
        red.body.place_at(tile_center(tile));
        red.set_state(GhostState::HuntingPac);
        session.advance(&TickInput::default());
    }

    #[test]
    fn test_loads_record_at_boot() {
        let store = MemoryStore::with_record(GameVariant::PacMan, Score::new(4_200, 3));
        let session = session(store);
        assert_eq!(session.state().game.high_score().points, 4_200);
        assert_eq!(session.snapshot().high_score, 4_200);
    }

    #[test]
    fn test_game_over_saves_better_score() {
        let mut session = session(MemoryStore::with_record(GameVariant::PacMan, Score::new(100, 1)));
        start_game(&mut session);
        session.state_mut().game.add_points(150);
        kill_pac(&mut session);
        run_until(&mut session, GamePhase::GameOver, 300);

        assert_eq!(session.store().saves, 1);
        let saved = session.store().load(GameVariant::PacMan).unwrap().unwrap();
        assert_eq!((saved.points, saved.level), (150, 1));
        assert!(saved.date.is_some());
        assert_eq!(session.record().points, 150);
    }

    #[test]
    fn test_game_over_keeps_better_record() {
        let mut session = session(MemoryStore::with_record(GameVariant::PacMan, Score::new(5_000, 4)));
        start_game(&mut session);
        session.state_mut().game.add_points(150);
        kill_pac(&mut session);
        run_until(&mut session, GamePhase::GameOver, 300);

        assert_eq!(session.store().saves, 0);
        assert_eq!(session.record().points, 5_000);
    }

    #[test]
    fn test_sounds_follow_events() {
        let mut session = session(MemoryStore::new());
        start_game(&mut session);
        let sounds = session.sink();
        assert_eq!(&sounds[..2], &[SoundEffect::Credit, SoundEffect::GameReady]);
        assert!(sounds.contains(&SoundEffect::Siren(1)));
    }

    struct BrokenStore;

    fn disk_gone() -> PersistError {
        PersistError::Io {
            path: "hiscore-pacman.json".into(),
            source: std::io::Error::other("disk gone"),
        }
    }

    impl HighScoreStore for BrokenStore {
        fn load(&self, _variant: GameVariant) -> Result<Option<Score>, PersistError> {
            Err(disk_gone())
        }

        fn save(&mut self, _variant: GameVariant, _score: &Score) -> Result<(), PersistError> {
            Err(disk_gone())
        }
    }

    #[test]
    fn test_storage_errors_are_ignored() {
        let config = GameConfig {
            initial_lives: 1,
            ..GameConfig::default()
        };
        let mut session = Session::new(config, BrokenStore, Vec::new());
        assert_eq!(session.record(), &Score::default());
        session.save_if_record(Score::new(10, 1));
        assert_eq!(session.record(), &Score::default());
    }
}
