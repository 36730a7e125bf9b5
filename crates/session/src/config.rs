//! Session configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_WIDTH` | 10 | grid columns, 4..=256 |
//! | `BLOCKFALL_HEIGHT` | 20 | grid rows, 4..=256 |
//! | `BLOCKFALL_TICK_MS` | 500 | milliseconds between steps, 1..=60000 |
//! | `BLOCKFALL_SEED` | clock | RNG seed |
//! | `BLOCKFALL_INPUT` | `events` | `events` (crossterm) or `raw` (stdin bytes) |
//! | `BLOCKFALL_QUEUE` | 64 | intent queue depth, 1..=4096 |
//! | `BLOCKFALL_LOG` | unset | log file; logging is off when unset |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, ensure, Context, Result};

use crate::types::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MIN_GRID_SIDE, TICK_MS};

pub const MAX_GRID_SIDE: u16 = 256;
pub const MAX_TICK: Duration = Duration::from_secs(60);
pub const MAX_QUEUE_DEPTH: usize = 4096;

/// Where keyboard input is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// crossterm key events
    Events,
    /// raw stdin bytes through the sequence decoder
    Raw,
}

impl FromStr for InputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "events" => Ok(InputMode::Events),
            "raw" => Ok(InputMode::Raw),
            other => bail!("unknown input mode {other:?}, expected \"events\" or \"raw\""),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub width: u16,
    pub height: u16,
    pub tick: Duration,
    pub seed: u32,
    pub input: InputMode,
    pub queue_depth: usize,
    pub log_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tick: Duration::from_millis(TICK_MS),
            seed: clock_seed(),
            input: InputMode::Events,
            queue_depth: 64,
            log_path: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(v) = get("BLOCKFALL_WIDTH") {
            config.width = v.parse().with_context(|| format!("BLOCKFALL_WIDTH={v}"))?;
        }
        if let Some(v) = get("BLOCKFALL_HEIGHT") {
            config.height = v.parse().with_context(|| format!("BLOCKFALL_HEIGHT={v}"))?;
        }
        if let Some(v) = get("BLOCKFALL_TICK_MS") {
            let ms: u64 = v.parse().with_context(|| format!("BLOCKFALL_TICK_MS={v}"))?;
            config.tick = Duration::from_millis(ms);
        }
        if let Some(v) = get("BLOCKFALL_SEED") {
            config.seed = v.parse().with_context(|| format!("BLOCKFALL_SEED={v}"))?;
        }
        if let Some(v) = get("BLOCKFALL_INPUT") {
            config.input = v.parse()?;
        }
        if let Some(v) = get("BLOCKFALL_QUEUE") {
            config.queue_depth = v.parse().with_context(|| format!("BLOCKFALL_QUEUE={v}"))?;
        }
        config.log_path = get("BLOCKFALL_LOG").map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Reject values the grid, the view or the intent channel cannot take.
    pub fn validate(&self) -> Result<()> {
        let sides = MIN_GRID_SIDE..=MAX_GRID_SIDE;
        ensure!(
            sides.contains(&self.width) && sides.contains(&self.height),
            "grid sides must be within {MIN_GRID_SIDE}..={MAX_GRID_SIDE}, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            !self.tick.is_zero() && self.tick <= MAX_TICK,
            "tick interval must be within 1..={}ms, got {}ms",
            MAX_TICK.as_millis(),
            self.tick.as_millis()
        );
        ensure!(
            (1..=MAX_QUEUE_DEPTH).contains(&self.queue_depth),
            "intent queue depth must be within 1..={MAX_QUEUE_DEPTH}, got {}",
            self.queue_depth
        );
        Ok(())
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
