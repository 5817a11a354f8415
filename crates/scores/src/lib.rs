//! High-score persistence.
//!
//! The table is a list of [`HighScoreRecord`]s kept sorted by score (highest first) and capped at
//! [`MAX_RECORDS`]. Stores never fail on load: a missing or corrupt table reads as empty.
//!
//! [`JsonFileStore`] keeps the table as JSON under the XDG config directory;
//! [`MemoryStore`] keeps it in memory for tests and headless runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of records kept
pub const MAX_RECORDS: usize = 10;

/// Name used when a score is submitted without one
pub const DEFAULT_PLAYER_NAME: &str = "Player";

const APP_DIR: &str = "tera-tetris";
const FILENAME: &str = "tera_highscores_v1.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub name: String,
    pub score: u32,
    /// Unix seconds
    pub date: u64,
}

impl HighScoreRecord {
    /// Record stamped with the current time. Blank names become [`DEFAULT_PLAYER_NAME`].
    pub fn now(name: &str, score: u32) -> Self {
        let date = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        Self {
            name: normalize_name(name),
            score,
            date,
        }
    }

    /// Calendar day (UTC) the record was set, as `(year, month, day)`.
    ///
    /// `None` for an unset (`0`) or out-of-range date.
    pub fn ymd(&self) -> Option<(i32, u32, u32)> {
        if self.date == 0 {
            return None;
        }
        let secs = i64::try_from(self.date).ok()?;
        let at = DateTime::from_timestamp(secs, 0)?;
        Some((at.year(), at.month(), at.day()))
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Insert `record`, re-sort descending and truncate.
///
/// The sort is stable, so among equal scores earlier records keep their rank.
pub fn insert_ranked(list: &mut Vec<HighScoreRecord>, record: HighScoreRecord) {
    list.push(record);
    list.sort_by(|a, b| b.score.cmp(&a.score));
    list.truncate(MAX_RECORDS);
}

/// Ranked high-score storage
pub trait ScoreStore {
    /// Current table, highest first. Never fails; unreadable storage is an empty table.
    fn load_top_scores(&self) -> Vec<HighScoreRecord>;

    /// Add a score and persist the updated table. Returns the table as stored.
    fn submit_score(&mut self, name: &str, score: u32) -> Result<Vec<HighScoreRecord>>;

    /// Remove every record
    fn clear(&mut self) -> Result<()>;

    /// Highest record, if any
    fn best(&self) -> Option<HighScoreRecord> {
        self.load_top_scores().into_iter().next()
    }
}

/// Returns the default table path (config dir / tera-tetris / tera_highscores_v1.json).
pub fn default_scores_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join(APP_DIR).join(FILENAME)
}

/// JSON table on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_scores_path`]
    pub fn open_default() -> Self {
        Self::new(default_scores_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<HighScoreRecord>> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let mut list: Vec<HighScoreRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        list.sort_by(|a, b| b.score.cmp(&a.score));
        list.truncate(MAX_RECORDS);
        Ok(list)
    }

    fn write(&self, list: &[HighScoreRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(list)?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn load_top_scores(&self) -> Vec<HighScoreRecord> {
        self.read().unwrap_or_default()
    }

    fn submit_score(&mut self, name: &str, score: u32) -> Result<Vec<HighScoreRecord>> {
        let mut list = self.load_top_scores();
        insert_ranked(&mut list, HighScoreRecord::now(name, score));
        self.write(&list)?;
        Ok(list)
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}

/// In-memory table
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<HighScoreRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn load_top_scores(&self) -> Vec<HighScoreRecord> {
        self.records.clone()
    }

    fn submit_score(&mut self, name: &str, score: u32) -> Result<Vec<HighScoreRecord>> {
        insert_ranked(&mut self.records, HighScoreRecord::now(name, score));
        Ok(self.records.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.records.clear();
        Ok(())
    }
}
