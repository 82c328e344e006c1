use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::board::Board;
use crate::timer::DEFAULT_COUNTDOWN_SECS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub board_path: Option<PathBuf>,
    pub timer_secs: u64,
    pub tick_ms: u64,
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_path: None,
            timer_secs: DEFAULT_COUNTDOWN_SECS,
            tick_ms: 250,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; bad numbers fall back to defaults
    /// and good ones are clamped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timer_secs = lookup("JEOPARDY_TIMER_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.timer_secs)
            .clamp(5, 300);
        let tick_ms = lookup("JEOPARDY_TICK_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.tick_ms)
            .clamp(50, 1000);
        Self {
            board_path: opt_path(lookup("JEOPARDY_BOARD")),
            timer_secs,
            tick_ms,
            log_path: opt_path(lookup("JEOPARDY_LOG")),
        }
    }

    pub fn countdown(&self) -> Duration {
        Duration::from_secs(self.timer_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn load_board(&self) -> Result<Board> {
        match &self.board_path {
            Some(path) => Board::load(path),
            None => Ok(Board::builtin()),
        }
    }
}

fn opt_path(raw: Option<String>) -> Option<PathBuf> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
