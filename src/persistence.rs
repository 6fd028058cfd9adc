//! High-score persistence.
//!
//! The simulation persists exactly one value. Stores are deliberately
//! fallible-but-ignorable: the engine reads once at startup, writes on new
//! highs and game end, and logs-and-continues on any failure.

use crate::ChompResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Version number for the high-score file format.
const RECORD_VERSION: u32 = 1;

/// A place to keep the best score between runs.
pub trait HighScoreStore: std::fmt::Debug {
    /// Reads the stored high score, if any.
    fn load(&mut self) -> ChompResult<Option<u32>>;

    /// Writes a new high score.
    fn save(&mut self, score: u32) -> ChompResult<()>;
}

/// In-memory store for tests and headless shells.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub value: Option<u32>,
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> ChompResult<Option<u32>> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> ChompResult<()> {
        self.value = Some(score);
        Ok(())
    }
}

/// On-disk serde_json store.
#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    version: u32,
    high_score: u32,
}

/// Stores the high score as a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. The file is created on first
    /// save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> ChompResult<Option<u32>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let record: HighScoreRecord = serde_json::from_str(&raw)?;
        if record.version != RECORD_VERSION {
            log::debug!("ignoring high score with format version {}", record.version);
            return Ok(None);
        }
        Ok(Some(record.high_score))
    }

    fn save(&mut self, score: u32) -> ChompResult<()> {
        let record = HighScoreRecord {
            version: RECORD_VERSION,
            high_score: score,
        };
        fs::write(&self.path, serde_json::to_string(&record)?)?;
        Ok(())
    }
}
