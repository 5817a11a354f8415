//! Application configuration for the terminal binary.

use std::path::PathBuf;

use crate::core::GameConfig;
use crate::scores::{default_scores_path, DEFAULT_PLAYER_NAME};

/// Session settings plus the host-only knobs
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub game: GameConfig,
    pub player_name: String,
    pub scores_path: PathBuf,
    /// Activity log file; `None` keeps the log in memory only
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            scores_path: default_scores_path(),
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    ///
    /// Everything [`GameConfig::from_env`] reads, plus `TERA_PLAYER_NAME`, `TERA_SCORES_PATH`
    /// and `TERA_LOG_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let player_name =
            non_empty("TERA_PLAYER_NAME").unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string());

        let scores_path = non_empty("TERA_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_scores_path);

        let log_path = non_empty("TERA_LOG_PATH").map(PathBuf::from);

        Self {
            game: GameConfig::from_lookup(&lookup),
            player_name,
            scores_path,
            log_path,
        }
    }
}
