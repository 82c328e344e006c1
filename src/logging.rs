//! Diagnostics via `tracing`.
//!
//! The TUI owns stdout/stderr, so events go to the file named by
//! `JEOPARDY_LOG`. Without it no subscriber is installed and events are
//! dropped. Player-facing messages live in the session console instead.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Reads `RUST_LOG`, defaulting to `info`.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .compact(),
        )
        .try_init()
        .context("failed installing tracing subscriber")
}
