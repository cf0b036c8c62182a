//! Maze Chase - headless runner
//!
//! Runs the simulation without graphics: attract mode by default, or a
//! credited game steered by the autopilot. Prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use maze_chase::Settings;

    #[derive(Parser, Debug)]
    #[command(name = "maze-chase")]
    #[command(about = "Headless runner for the maze chase simulation")]
    pub struct Args {
        /// Settings file (JSON); defaults apply when it is missing
        #[arg(default_value = Settings::FILE_NAME)]
        pub settings: PathBuf,
        /// Ticks to simulate, overrides `demo_ticks`
        #[arg(long)]
        pub ticks: Option<u64>,
        /// Insert a coin and start a game instead of watching attract mode
        #[arg(long)]
        pub credit: bool,
        /// RNG seed, overrides `seed`
        #[arg(long)]
        pub seed: Option<u64>,
    }

    impl Args {
        /// Settings file contents with the command line overrides applied
        pub fn apply(&self, mut settings: Settings) -> Settings {
            if let Some(ticks) = self.ticks {
                settings.demo_ticks = ticks;
            }
            if self.credit {
                settings.demo_credit = true;
            }
            if self.seed.is_some() {
                settings.seed = self.seed;
            }
            settings
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use maze_chase::audio::LogSink;
    use maze_chase::persistence::JsonFileStore;
    use maze_chase::sim::{GameEvent, TickInput, autopilot};
    use maze_chase::{Session, Settings};

    env_logger::init();
    log::info!("Maze Chase (headless) starting...");

    let args = cli::Args::parse();
    let settings = args.apply(Settings::load(&args.settings));

    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let config = settings.to_game_config(clock_seed);
    log::info!("Game initialized with seed: {}", config.seed);

    let mut sink = LogSink::new();
    sink.set_muted(settings.muted);
    let store = JsonFileStore::new(&settings.hiscore_dir);
    let mut session = Session::new(config, store, sink);

    for n in 0..settings.demo_ticks {
        let playing = session.state().is_playing();
        let input = TickInput {
            add_credit: settings.demo_credit && n == 0,
            start_game: settings.demo_credit && n == 1,
            steer: if playing { autopilot(&session.state().game) } else { None },
            ..TickInput::default()
        };
        for event in session.advance(&input) {
            match event {
                GameEvent::LevelStarted { number } => log::info!("Level {number}"),
                GameEvent::GameOver { points, level } => {
                    log::info!("Game over: {points} points, level {level}")
                }
                _ => {}
            }
        }
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page on wasm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::cli::Args;
    use clap::Parser;
    use maze_chase::Settings;

    #[test]
    fn test_defaults_keep_settings() {
        let args = Args::try_parse_from(["maze-chase"]).unwrap();
        assert_eq!(args.settings, std::path::PathBuf::from(Settings::FILE_NAME));
        assert_eq!(args.apply(Settings::default()), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let args =
            Args::try_parse_from(["maze-chase", "demo.json", "--ticks", "600", "--credit", "--seed", "9"])
                .unwrap();
        let settings = args.apply(Settings::default());
        assert_eq!(args.settings, std::path::PathBuf::from("demo.json"));
        assert_eq!(settings.demo_ticks, 600);
        assert!(settings.demo_credit);
        assert_eq!(settings.seed, Some(9));
    }
}
