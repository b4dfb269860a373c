//! High score persistence
//!
//! A single integer, stored as ASCII decimal text. Loading never fails (a
//! missing or garbled file reads as 0) and saving is best effort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";

/// Load/save contract the session relies on
pub trait HighScoreStore {
    /// Stored high score, or 0 when there is none
    fn load_highscore(&self) -> u64;
    /// Persist a new high score; failures are logged and dropped
    fn save_highscore(&mut self, score: u64);
}

/// Parse the on-disk format: one decimal integer, surrounding whitespace allowed
pub fn parse_highscore(text: &str) -> Option<u64> {
    text.trim().parse().ok()
}

/// High score kept in a text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn write(&self, score: u64) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(&self.path, format!("{}\n", score))
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_highscore(&self) -> u64 {
        match self.read() {
            Ok(text) => match parse_highscore(&text) {
                Some(score) => {
                    log::info!("Loaded high score {} from {}", score, self.path.display());
                    score
                }
                None => {
                    log::warn!("Ignoring unreadable high score in {}", self.path.display());
                    0
                }
            },
            Err(_) => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save_highscore(&mut self, score: u64) {
        match self.write(score) {
            Ok(()) => log::info!("High score {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Could not save high score to {}: {}", self.path.display(), e),
        }
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    pub score: u64,
    /// Number of save calls received
    pub saves: u32,
}

impl MemoryHighScoreStore {
    pub fn new(score: u64) -> Self {
        Self { score, saves: 0 }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_highscore(&self) -> u64 {
        self.score
    }

    fn save_highscore(&mut self, score: u64) {
        self.score = score;
        self.saves += 1;
    }
}
