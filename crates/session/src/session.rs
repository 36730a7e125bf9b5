//! The session loop: one task owns the grid and serializes ticks and intents.
//!
//! Ticks come from a `tokio::time::interval`, intents from an mpsc channel fed
//! by the input reader. Both are handled inside one `select!`, so a step and
//! an intent never interleave.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::core::{Grid, StepEvent};
use crate::types::Intent;

/// Message delivered to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Intent(Intent),
    Quit,
}

/// Draws the grid. Called after every tick and every accepted intent.
pub trait Renderer {
    fn draw(&mut self, grid: &Grid) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub intents_applied: u64,
    pub intents_rejected: u64,
    pub pieces_locked: u64,
    pub lines_cleared: u64,
}

pub struct Session {
    grid: Grid,
    tick_interval: Duration,
    stats: SessionStats,
    game_over_logged: bool,
}

impl Session {
    pub fn new(grid: Grid, tick_interval: Duration) -> Self {
        Self {
            grid,
            tick_interval,
            stats: SessionStats::default(),
            game_over_logged: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// One simulation step.
    pub fn tick(&mut self) -> StepEvent {
        let ev = self.grid.step();
        self.stats.ticks += 1;

        if let Some(kind) = ev.locked {
            self.stats.pieces_locked += 1;
            debug!(kind = kind.as_str(), "piece locked");
        }
        if ev.lines_cleared > 0 {
            self.stats.lines_cleared += ev.lines_cleared as u64;
            debug!(lines = ev.lines_cleared, "rows cleared");
        }
        if ev.game_over && !self.game_over_logged {
            self.game_over_logged = true;
            info!(
                ticks = self.stats.ticks,
                pieces = self.stats.pieces_locked,
                "game over: spawn blocked"
            );
        }
        ev
    }

    /// Apply an intent. Returns whether the grid changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.grid.apply_intent(intent) {
            self.stats.intents_applied += 1;
            true
        } else {
            self.stats.intents_rejected += 1;
            trace!(intent = intent.as_str(), "intent rejected");
            false
        }
    }

    /// Run until `Quit` arrives or every sender is dropped.
    pub async fn run<R: Renderer>(
        mut self,
        renderer: &mut R,
        mut events: mpsc::Receiver<SessionEvent>,
    ) -> Result<Self> {
        self.grid.start();
        renderer.draw(&self.grid)?;

        let mut interval = time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            tick_ms = self.tick_interval.as_millis() as u64,
            "session started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.tick();
                    renderer.draw(&self.grid)?;
                }
                ev = events.recv() => match ev {
                    Some(SessionEvent::Intent(intent)) => {
                        if self.apply(intent) {
                            renderer.draw(&self.grid)?;
                        }
                    }
                    Some(SessionEvent::Quit) | None => break,
                },
            }
        }

        info!(
            ticks = self.stats.ticks,
            pieces = self.stats.pieces_locked,
            lines = self.stats.lines_cleared,
            "session ended"
        );
        Ok(self)
    }
}
