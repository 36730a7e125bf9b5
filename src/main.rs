//! Terminal runner (default binary).
//!
//! Wires the session to crossterm: the terminal renderer draws every frame,
//! the configured input source feeds intents, and Ctrl-C / SIGINT end the
//! session. The terminal is restored on every exit path.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::core::{Grid, GridSnapshot};
use blockfall::input::{ByteStream, TerminalEvents};
use blockfall::session::{
    spawn_input_reader, InputMode, Renderer, Session, SessionConfig, SessionEvent,
};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = SessionConfig::from_env()?;
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let rt = Runtime::new().context("create tokio runtime")?;
    let mut screen = Screen::new();

    let result = screen.term.enter().and_then(|_| rt.block_on(play(&config, &mut screen)));

    // Always try to restore terminal state.
    let restored = screen.term.exit();
    // The input reader may still be blocked on a read.
    rt.shutdown_background();
    result.and(restored)
}

async fn play(config: &SessionConfig, screen: &mut Screen) -> Result<()> {
    info!(seed = config.seed, input = ?config.input, "starting");

    let (tx, rx) = mpsc::channel(config.queue_depth);

    let signal_tx = tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(SessionEvent::Quit).await;
        }
    });

    let _reader = match config.input {
        InputMode::Events => spawn_input_reader(TerminalEvents, tx),
        InputMode::Raw => spawn_input_reader(ByteStream::new(io::stdin()), tx),
    };

    let grid = Grid::new(config.width, config.height, config.seed);
    let session = Session::new(grid, config.tick).run(screen, rx).await?;

    let stats = session.stats();
    if session.grid().is_game_over() {
        warn!(pieces = stats.pieces_locked, "quit after game over");
    }
    info!(
        ticks = stats.ticks,
        applied = stats.intents_applied,
        rejected = stats.intents_rejected,
        lines = stats.lines_cleared,
        "bye"
    );
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// The terminal side of the session: view, framebuffer and renderer.
struct Screen {
    term: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    snap: GridSnapshot,
}

impl Screen {
    fn new() -> Self {
        Self {
            term: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            snap: GridSnapshot::new(0, 0),
        }
    }
}

impl Renderer for Screen {
    fn draw(&mut self, grid: &Grid) -> Result<()> {
        grid.snapshot_into(&mut self.snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view
            .render_into(&self.snap, Viewport::new(w, h), &mut self.fb);
        self.term.draw(&self.fb)
    }
}
