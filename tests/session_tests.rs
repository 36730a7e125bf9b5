//! Session loop driven by concurrent producers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Result};
use tokio::sync::mpsc;

use blockfall::core::{Grid, SimpleRng};
use blockfall::input::ByteStream;
use blockfall::session::{spawn_input_reader, Renderer, Session, SessionEvent};
use blockfall::types::{Intent, PieceKind};

/// Checks structural invariants on every frame.
#[derive(Default)]
struct CheckingRenderer {
    frames: usize,
}

impl Renderer for CheckingRenderer {
    fn draw(&mut self, grid: &Grid) -> Result<()> {
        self.frames += 1;
        let (w, h) = (grid.width() as i32, grid.height() as i32);
        ensure!(grid.cells().len() == (w * h) as usize, "cell count changed");

        if grid.is_game_over() {
            ensure!(grid.active().is_none(), "active piece after game over");
        }
        if let Some(piece) = grid.active() {
            for (x, y) in piece.grid_cells() {
                ensure!(
                    (0..w).contains(&x) && (0..h).contains(&y),
                    "active cell ({x}, {y}) out of bounds"
                );
            }
        }
        let snap = grid.snapshot();
        ensure!(snap.cells.len() == grid.cells().len(), "snapshot size");
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_intents_are_serialized() {
    const PRODUCERS: u32 = 8;
    const PER_PRODUCER: usize = 200;

    let (tx, rx) = mpsc::channel(16);
    let sent = Arc::new(AtomicUsize::new(0));

    let mut producers = Vec::new();
    for id in 0..PRODUCERS {
        let tx = tx.clone();
        let sent = Arc::clone(&sent);
        producers.push(tokio::spawn(async move {
            let mut rng = SimpleRng::new(id + 1);
            for _ in 0..PER_PRODUCER {
                let intent = match rng.next_range(3) {
                    0 => Intent::MoveLeft,
                    1 => Intent::MoveRight,
                    _ => Intent::Rotate,
                };
                if tx.send(SessionEvent::Intent(intent)).await.is_err() {
                    break;
                }
                sent.fetch_add(1, Ordering::Relaxed);
                if rng.next_range(4) == 0 {
                    tokio::task::yield_now().await;
                }
            }
        }));
    }

    let session = tokio::spawn(async move {
        let mut renderer = CheckingRenderer::default();
        let session = Session::new(Grid::new(10, 20, 42), Duration::from_millis(1))
            .run(&mut renderer, rx)
            .await;
        (session, renderer.frames)
    });

    for p in producers {
        p.await.unwrap();
    }
    // Every intent is queued ahead of this.
    tx.send(SessionEvent::Quit).await.unwrap();

    let (session, frames) = session.await.unwrap();
    let session = session.unwrap();
    let stats = session.stats();

    assert_eq!(sent.load(Ordering::Relaxed), PRODUCERS as usize * PER_PRODUCER);
    assert_eq!(
        (stats.intents_applied + stats.intents_rejected) as usize,
        PRODUCERS as usize * PER_PRODUCER
    );
    assert!(frames >= 1 + stats.intents_applied as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ticks_keep_running_while_intents_arrive() {
    let (tx, rx) = mpsc::channel(4);

    let feeder = tokio::spawn(async move {
        for _ in 0..50 {
            if tx.send(SessionEvent::Intent(Intent::Rotate)).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        let _ = tx.send(SessionEvent::Quit).await;
    });

    let mut renderer = CheckingRenderer::default();
    let session = Session::new(Grid::new(10, 20, 7), Duration::from_millis(1))
        .run(&mut renderer, rx)
        .await
        .unwrap();
    feeder.await.unwrap();

    assert!(session.stats().ticks > 0);
    assert_eq!(
        session.stats().intents_applied + session.stats().intents_rejected,
        50
    );
}

#[tokio::test]
async fn byte_input_session_applies_and_rejects() {
    let mut grid = Grid::new(10, 20, 1);
    grid.spawn(PieceKind::O);

    let (tx, rx) = mpsc::channel(32);
    let input = b"\x1b[D".repeat(10);
    let reader = spawn_input_reader(ByteStream::new(std::io::Cursor::new(input)), tx);

    // Long tick: only intents reach the grid before input runs out.
    let mut renderer = CheckingRenderer::default();
    let session = Session::new(grid, Duration::from_secs(3600))
        .run(&mut renderer, rx)
        .await
        .unwrap();
    reader.await.unwrap();

    let stats = session.stats();
    assert_eq!(stats.intents_applied, 4);
    assert_eq!(stats.intents_rejected, 6);
    assert_eq!(stats.ticks, 0);
    assert_eq!(session.grid().active().unwrap().x(), 0);
    // Initial frame plus one per accepted move.
    assert_eq!(renderer.frames, 5);
}

#[tokio::test]
async fn renderer_error_ends_the_session() {
    struct Failing;
    impl Renderer for Failing {
        fn draw(&mut self, _grid: &Grid) -> Result<()> {
            anyhow::bail!("terminal gone")
        }
    }

    let (_tx, rx) = mpsc::channel(1);
    let result = Session::new(Grid::new(10, 20, 1), Duration::from_millis(1))
        .run(&mut Failing, rx)
        .await;
    assert!(result.is_err());
}
