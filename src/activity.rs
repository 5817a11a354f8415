//! Activity log: timestamped, human-readable session history.
//!
//! Lines look like `[mm:ss] Leveled up to 3`, stamped with gameplay time. The most recent lines
//! are kept in memory for the HUD; with a log file configured every line is also appended there.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::SessionEvent;

/// Lines kept for the HUD
pub const DEFAULT_CAPACITY: usize = 32;

pub struct ActivityLog {
    lines: Vec<String>,
    capacity: usize,
    sink: Option<File>,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
            sink: None,
        }
    }

    /// Also append every line to `path` (created if missing).
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening activity log {}", path.display()))?;
        self.sink = Some(file);
        Ok(self)
    }

    /// Lines in memory, oldest first
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn push(&mut self, elapsed_ms: u64, message: &str) {
        let line = format!("{} {}", stamp(elapsed_ms), message);

        if let Some(file) = self.sink.as_mut() {
            if let Err(e) = writeln!(file, "{line}") {
                eprintln!("[tera-tetris] activity log disabled: {e}");
                self.sink = None;
            }
        }

        if self.lines.len() == self.capacity {
            self.lines.remove(0);
        }
        self.lines.push(line);
    }

    pub fn record(&mut self, elapsed_ms: u64, event: &SessionEvent) {
        self.push(elapsed_ms, &describe(event));
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// `[mm:ss]`
fn stamp(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    format!("[{:02}:{:02}]", secs / 60, secs % 60)
}

/// Log message for a session event
pub fn describe(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Started => "Game started".to_string(),
        SessionEvent::Paused => "Paused".to_string(),
        SessionEvent::Resumed => "Resumed".to_string(),
        SessionEvent::LinesCleared(1) => "Cleared 1 line".to_string(),
        SessionEvent::LinesCleared(n) => format!("Cleared {n} lines"),
        SessionEvent::LeveledUp(level) => format!("Leveled up to {level}"),
        SessionEvent::GameOver { final_score } => format!("Game Over. Score: {final_score}"),
        SessionEvent::StabilityComputed(pct) => format!("Stability: {pct}%"),
        SessionEvent::StabilityToppled { cells } => {
            format!("Simulated falling of {cells} unstable cells")
        }
    }
}
