//! High score persistence
//!
//! Features:
//! - One JSON file per game variant (`hiscore-<variant>.json`)
//! - Atomic writes (tmp file, then rename over the record)
//! - In-memory store for tests and headless runs
//!
//! A missing record is `Ok(None)`. Unreadable or corrupt files are errors
//! that callers log and otherwise ignore.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::highscores::Score;
use crate::sim::GameVariant;

#[derive(Debug)]
pub enum PersistError {
    Io { path: PathBuf, source: io::Error },
    Format { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on {}: {source}", path.display()),
            Self::Format { path, source } => {
                write!(f, "malformed high score file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Format { source, .. } => Some(source),
        }
    }
}

/// Storage of one high score record per game variant
pub trait HighScoreStore {
    fn load(&self, variant: GameVariant) -> Result<Option<Score>, PersistError>;
    fn save(&mut self, variant: GameVariant, score: &Score) -> Result<(), PersistError>;
}

/// Records kept as JSON files in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, variant: GameVariant) -> PathBuf {
        self.dir.join(format!("hiscore-{}.json", variant.key()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self, variant: GameVariant) -> Result<Option<Score>, PersistError> {
        let path = self.path_for(variant);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path)(e)),
        };
        let score = serde_json::from_str(&json).map_err(|source| PersistError::Format {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded high score from {}", path.display());
        Ok(Some(score))
    }

    fn save(&mut self, variant: GameVariant, score: &Score) -> Result<(), PersistError> {
        let path = self.path_for(variant);
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let json = serde_json::to_string_pretty(score).map_err(|source| PersistError::Format {
            path: path.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_error(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_error(&path))?;
        log::info!("High score {} saved to {}", score.points, path.display());
        Ok(())
    }
}

/// Records kept in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<GameVariant, Score>,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(variant: GameVariant, score: Score) -> Self {
        let mut store = Self::default();
        store.records.insert(variant, score);
        store
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, variant: GameVariant) -> Result<Option<Score>, PersistError> {
        Ok(self.records.get(&variant).copied())
    }

    fn save(&mut self, variant: GameVariant, score: &Score) -> Result<(), PersistError> {
        self.records.insert(variant, *score);
        self.saves += 1;
        Ok(())
    }
}
